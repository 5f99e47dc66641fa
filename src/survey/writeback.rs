// Write-back of the scored table to an Excel workbook.

use log::info;

use rust_xlsxwriter::{Color, Format, Workbook};
use snafu::prelude::*;

use rating_consistency::{Column, ScoredCell, ScoredTable, Verdict};

use std::fs;
use std::path::Path;

use crate::survey::*;

/// A declarative highlight: cells of `column` whose text equals
/// `match_value` get `color` as their background.
#[derive(Debug, Clone, Copy)]
pub struct HighlightRule {
    pub column: Column,
    pub match_value: &'static str,
    pub color: Color,
}

/// Green for consistent rows, red for the rest.
pub fn default_highlights() -> Vec<HighlightRule> {
    vec![
        HighlightRule {
            column: Column::Result,
            match_value: Verdict::Ok.label(),
            color: Color::RGB(0xC6EFCE),
        },
        HighlightRule {
            column: Column::Result,
            match_value: Verdict::NotOk.label(),
            color: Color::RGB(0xFFC7CE),
        },
    ]
}

/// Writes the scored table starting at A1: one header row, then one row
/// per record.
///
/// The write is two-phase: the destination is cleared first, then the
/// new workbook is saved. A failure between the two phases leaves no
/// destination file; there is no rollback.
pub fn write_scored_table(
    path: &str,
    table: &ScoredTable,
    rules: &[HighlightRule],
) -> RatingResult<()> {
    if Path::new(path).exists() {
        fs::remove_file(path).context(ClearingDestinationSnafu {
            path: path.to_string(),
        })?;
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();
    for (col, column) in table.columns.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, column.title(), &header_format)
            .context(WriteBackSnafu {
                path: path.to_string(),
            })?;
    }

    for (idx, row) in table.rows.iter().enumerate() {
        let row_idx = (idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col_idx = col as u16;
            let highlight = rules.iter().find(|rule| {
                table.columns.get(col) == Some(&rule.column) && matches_cell(cell, rule.match_value)
            });
            let res = match (cell, highlight) {
                (ScoredCell::Text(s), Some(rule)) => worksheet
                    .write_with_format(
                        row_idx,
                        col_idx,
                        s.as_str(),
                        &Format::new().set_background_color(rule.color),
                    )
                    .map(|_| ()),
                (ScoredCell::Text(s), None) => {
                    worksheet.write(row_idx, col_idx, s.as_str()).map(|_| ())
                }
                (ScoredCell::Number(x), _) => worksheet.write(row_idx, col_idx, *x).map(|_| ()),
                (ScoredCell::Empty, _) => Ok(()),
            };
            res.context(WriteBackSnafu {
                path: path.to_string(),
            })?;
        }
    }

    workbook.save(path).context(WriteBackSnafu {
        path: path.to_string(),
    })?;
    info!("Wrote {} scored rows to {}", table.rows.len(), path);
    Ok(())
}

fn matches_cell(cell: &ScoredCell, match_value: &str) -> bool {
    matches!(cell, ScoredCell::Text(s) if s == match_value)
}
