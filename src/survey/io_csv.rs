// Primitives for reading CSV exports of the survey sheet.

use log::debug;
use snafu::prelude::*;

use crate::survey::*;

pub fn read_sheet_values(source: &SheetSource) -> RatingResult<Vec<Vec<String>>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(&source.path)
        .context(CsvOpenSnafu {
            path: source.path.clone(),
        })?;
    let mut records = rdr.into_records();
    // The index starts at 1 to respect most conventions in the excel world
    for _ in 1..source.first_row {
        _ = records.next();
    }
    let mut res: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + source.first_row;
        let line = line_r.context(CsvLineSnafu { lineno })?;
        debug!("read_sheet_values: lineno: {:?} line: {:?}", lineno, line);
        res.push(line.iter().map(|s| s.to_string()).collect());
    }
    ensure!(
        !res.is_empty(),
        EmptySheetSnafu {
            path: source.path.clone()
        }
    );
    Ok(res)
}
