mod config;
pub mod manual;

use log::{debug, info};

use std::collections::HashMap;

pub use crate::config::*;

/// Normalizes a raw survey table to the canonical column set.
///
/// Arguments:
/// * `values` the raw table; the first row is the header, every
/// subsequent row is one survey response
/// * `observer` receives a notification for every unresolved column
///
/// For each canonical field, the first of its accepted header names
/// found in the header resolves that column; the other fields are
/// dropped with a notification. The output preserves the row order and
/// the row count of the input (minus the header row). Rows shorter than
/// the header are padded with empty cells.
///
/// Fails when there are no data rows, or when the required subset
/// (overall rating, unique id, and at least one rating axis) cannot be
/// resolved.
pub fn normalize_table(
    values: &[Vec<String>],
    observer: &dyn Observer,
) -> Result<NormalizedTable, ConsistencyErrors> {
    let (header, data) = match values.split_first() {
        Some(x) => x,
        None => return Err(ConsistencyErrors::EmptyTable),
    };
    if data.is_empty() {
        return Err(ConsistencyErrors::EmptyTable);
    }

    let col_names: HashMap<&str, usize> = header
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim(), idx))
        .collect();
    debug!("normalize_table: col_names: {:?}", col_names);

    let mut resolved: Vec<(Field, usize)> = Vec::new();
    for field in Field::ALL {
        match field.aliases().iter().find_map(|a| col_names.get(a)) {
            Some(idx) => resolved.push((field, *idx)),
            None => observer.column_missing(field),
        }
    }
    debug!("normalize_table: resolved: {:?}", resolved);

    let has = |field: Field| resolved.iter().any(|(f, _)| *f == field);
    let mut missing: Vec<String> = Vec::new();
    for field in [Field::OverallRating, Field::UniqueId] {
        if !has(field) {
            missing.push(field.title().to_string());
        }
    }
    if !Field::RATING_AXES.iter().any(|f| has(*f)) {
        missing.extend(Field::RATING_AXES.iter().map(|f| f.title().to_string()));
    }
    if !missing.is_empty() {
        return Err(ConsistencyErrors::MissingColumns(missing));
    }

    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|row| {
            resolved
                .iter()
                .map(|(_, idx)| row.get(*idx).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    let fields: Vec<Field> = resolved.iter().map(|(f, _)| *f).collect();
    info!(
        "normalize_table: resolved {} columns over {} rows",
        fields.len(),
        rows.len()
    );
    Ok(NormalizedTable { fields, rows })
}

/// Computes the consistency statistics for every row of the normalized
/// table.
///
/// For each row: the mean of the rating axes that are present, the
/// signed difference between that mean and the overall rating, and the
/// verdict of the difference against the tolerance band.
///
/// This is a pure function and it never fails: a cell that does not
/// parse as a number degrades to a missing value (reported to the
/// observer) and the row continues.
pub fn run_consistency_stats(table: &NormalizedTable, observer: &dyn Observer) -> ScoredTable {
    let columns = scored_columns(&table.fields);
    let rows: Vec<Vec<ScoredCell>> = table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| score_row(&columns, &table.fields, idx, row, observer))
        .collect();
    info!("run_consistency_stats: scored {} rows", rows.len());
    ScoredTable { columns, rows }
}

/// The destination column order: categorical fields, the four rating
/// axes, the overall rating, the three derived statistics, and the
/// unique id last.
fn scored_columns(fields: &[Field]) -> Vec<Column> {
    let mut columns: Vec<Column> = fields
        .iter()
        .filter(|f| **f != Field::UniqueId)
        .map(|f| Column::Source(*f))
        .collect();
    columns.push(Column::MeanRating);
    columns.push(Column::Difference);
    columns.push(Column::Result);
    if fields.contains(&Field::UniqueId) {
        columns.push(Column::Source(Field::UniqueId));
    }
    columns
}

fn score_row(
    columns: &[Column],
    fields: &[Field],
    idx: usize,
    row: &[String],
    observer: &dyn Observer,
) -> Vec<ScoredCell> {
    // 1-based line number in the source sheet, header included.
    let lineno = idx + 2;
    let lookup = |field: Field| {
        fields
            .iter()
            .position(|f| *f == field)
            .map(|pos| row[pos].as_str())
    };

    let mut numeric: HashMap<Field, Option<f64>> = HashMap::new();
    for field in Field::ALL {
        if !field.is_numeric() {
            continue;
        }
        if let Some(content) = lookup(field) {
            numeric.insert(field, parse_rating(lineno, field, content, observer));
        }
    }

    let axes: Vec<f64> = Field::RATING_AXES
        .iter()
        .filter_map(|f| numeric.get(f).copied().flatten())
        .collect();
    // The mean is taken over the ratings that are actually present.
    let mean = if axes.is_empty() {
        None
    } else {
        Some(axes.iter().sum::<f64>() / axes.len() as f64)
    };
    let overall = numeric.get(&Field::OverallRating).copied().flatten();
    let difference = match (mean, overall) {
        (Some(m), Some(o)) => Some(m - o),
        _ => None,
    };
    let verdict = Verdict::classify(difference);
    debug!(
        "score_row: lineno: {:?} mean: {:?} difference: {:?} verdict: {:?}",
        lineno, mean, difference, verdict
    );

    columns
        .iter()
        .map(|column| match column {
            Column::Source(field) if field.is_numeric() => {
                number_cell(numeric.get(field).copied().flatten())
            }
            Column::Source(field) => match lookup(*field) {
                Some(s) if !s.is_empty() => ScoredCell::Text(s.to_string()),
                _ => ScoredCell::Empty,
            },
            Column::MeanRating => number_cell(mean),
            Column::Difference => number_cell(difference),
            Column::Result => ScoredCell::Text(verdict.label().to_string()),
        })
        .collect()
}

fn number_cell(value: Option<f64>) -> ScoredCell {
    match value {
        Some(x) => ScoredCell::Number(x),
        None => ScoredCell::Empty,
    }
}

/// An empty cell is simply missing; any other content that does not
/// parse as a number is reported before degrading to missing.
fn parse_rating(
    lineno: usize,
    field: Field,
    content: &str,
    observer: &dyn Observer,
) -> Option<f64> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(x) => Some(x),
        Err(_) => {
            observer.cell_unparsable(lineno, field, content);
            None
        }
    }
}
