use log::{info, warn};

use rating_consistency::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde::Serialize;
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;
pub mod writeback;

#[derive(Debug, Snafu)]
pub enum RatingError {
    #[snafu(display("Error opening workbook {path}"))]
    OpeningWorkbook {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Missing worksheet {name} in workbook {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("The workbook {path} has several worksheets, the worksheet name must be provided"))]
    AmbiguousWorksheet { path: String },
    #[snafu(display("No data found in {path}"))]
    EmptySheet { path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV line {lineno}"))]
    CsvLine { source: csv::Error, lineno: usize },
    #[snafu(display("Unsupported input format for {path} (xlsx and csv are supported)"))]
    UnknownProvider { path: String },
    #[snafu(display("{source}"))]
    Normalize { source: ConsistencyErrors },
    #[snafu(display("Error clearing the destination {path}"))]
    ClearingDestination {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing results to {path}"))]
    WriteBack {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Computed summary differs from the reference summary"))]
    SummaryMismatch {},
}

pub type RatingResult<T> = Result<T, RatingError>;

/// Identifies the spreadsheet block to audit.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct SheetSource {
    pub path: String,
    /// Worksheet to read for Excel inputs. Defaults to the only worksheet of the workbook.
    pub worksheet: Option<String>,
    /// 1-based index of the header row, following the Excel convention.
    pub first_row: usize,
}

impl SheetSource {
    pub fn from_args(args: &Args) -> SheetSource {
        SheetSource {
            path: args.input.clone(),
            worksheet: args.worksheet.clone(),
            first_row: args.first_row.unwrap_or(1),
        }
    }
}

fn read_sheet_values(source: &SheetSource) -> RatingResult<Vec<Vec<String>>> {
    info!("Attempting to read rating file {:?}", source.path);
    match io_common::file_extension(&source.path).as_deref() {
        Some("xlsx") | Some("xlsm") => io_xlsx::read_sheet_values(source),
        Some("csv") => io_csv::read_sheet_values(source),
        _ => UnknownProviderSnafu {
            path: source.path.clone(),
        }
        .fail(),
    }
}

/// Runs the whole audit: read, normalize, score, then the optional
/// outputs. The in-memory result stays valid even if a later output
/// step fails.
pub fn run_audit(args: &Args) -> RatingResult<ScoredTable> {
    let source = SheetSource::from_args(args);
    let values = read_sheet_values(&source)?;
    info!("Retrieved {} rows of data", values.len().saturating_sub(1));

    let observer = LogObserver;
    let normalized = normalize_table(&values, &observer).context(NormalizeSnafu {})?;
    let scored = run_consistency_stats(&normalized, &observer);

    let summary = build_summary_js(&source, &scored);
    let pretty_js_stats = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;
    match args.out.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => fs::write(path, &pretty_js_stats).context(OpeningJsonSnafu {
            path: path.to_string(),
        })?,
    }

    // The reference summary, if provided for comparison
    if let Some(reference) = &args.reference {
        check_reference(reference, &pretty_js_stats)?;
    }

    if let Some(dest) = &args.write_back {
        writeback::write_scored_table(dest, &scored, &writeback::default_highlights())?;
    }

    Ok(scored)
}

/// One JSON object per scored row, keyed by the output column titles,
/// with a small config header identifying the source block.
fn build_summary_js(source: &SheetSource, scored: &ScoredTable) -> JSValue {
    let columns: Vec<&str> = scored.columns.iter().map(|c| c.title()).collect();
    let mut records: Vec<JSValue> = Vec::new();
    for row in &scored.rows {
        let mut obj: JSMap<String, JSValue> = JSMap::new();
        for (column, cell) in scored.columns.iter().zip(row) {
            obj.insert(column.title().to_string(), cell_to_js(cell));
        }
        records.push(JSValue::Object(obj));
    }
    json!({
        "config": source,
        "columns": columns,
        "records": records })
}

fn cell_to_js(cell: &ScoredCell) -> JSValue {
    match cell {
        ScoredCell::Text(s) => json!(s),
        ScoredCell::Number(x) => json!(x),
        ScoredCell::Empty => JSValue::Null,
    }
}

fn check_reference(path: &str, pretty_js_stats: &str) -> RatingResult<()> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.to_string(),
    })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    let pretty_js_reference = serde_json::to_string_pretty(&js).context(ParsingJsonSnafu {})?;
    if pretty_js_reference != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_reference.as_str(), pretty_js_stats, "\n");
        return SummaryMismatchSnafu {}.fail();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &[&str] = &[
        "Email Address",
        "Tool being used",
        "Feature used",
        "Context Awareness",
        "Autonomy",
        "Experience",
        "Output Quality",
        "Overall Rating",
        "Unique ID",
    ];

    fn raw(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn summary_for(values: &[Vec<String>]) -> JSValue {
        let normalized = normalize_table(values, &LogObserver).unwrap();
        let scored = run_consistency_stats(&normalized, &LogObserver);
        let source = SheetSource {
            path: "pod5.xlsx".to_string(),
            worksheet: Some("POD 5".to_string()),
            first_row: 1,
        };
        build_summary_js(&source, &scored)
    }

    #[test]
    fn summary_records() {
        let values = raw(&[
            HEADER,
            &["a@x.com", "T1", "F1", "4", "4", "4", "4", "4", "ID1"],
            &["b@x.com", "T2", "F2", "2", "2", "2", "2", "4", "ID2"],
        ]);
        let js = summary_for(&values);
        assert_eq!(js["config"]["path"], json!("pod5.xlsx"));
        assert_eq!(js["config"]["worksheet"], json!("POD 5"));
        assert_eq!(js["records"][0]["Mean Rating"], json!(4.0));
        assert_eq!(js["records"][0]["Difference"], json!(0.0));
        assert_eq!(js["records"][0]["Result"], json!("Ok"));
        assert_eq!(js["records"][0]["Unique ID"], json!("ID1"));
        assert_eq!(js["records"][1]["Mean Rating"], json!(2.0));
        assert_eq!(js["records"][1]["Difference"], json!(-2.0));
        assert_eq!(js["records"][1]["Result"], json!("Not ok"));
    }

    #[test]
    fn summary_columns_keep_the_destination_order() {
        let values = raw(&[
            HEADER,
            &["a@x.com", "T1", "F1", "4", "4", "4", "4", "4", "ID1"],
        ]);
        let js = summary_for(&values);
        assert_eq!(js["columns"][0], json!("Email address"));
        assert_eq!(js["columns"][8], json!("Mean Rating"));
        assert_eq!(js["columns"][11], json!("Unique ID"));
    }

    #[test]
    fn summary_missing_values_are_null() {
        let values = raw(&[
            HEADER,
            &["a@x.com", "T1", "F1", "bad", "bad", "bad", "bad", "", "ID1"],
        ]);
        let js = summary_for(&values);
        assert_eq!(js["records"][0]["Mean Rating"], JSValue::Null);
        assert_eq!(js["records"][0]["Difference"], JSValue::Null);
        assert_eq!(js["records"][0]["Overall Rating"], JSValue::Null);
        assert_eq!(js["records"][0]["Result"], json!("Not ok"));
    }
}
