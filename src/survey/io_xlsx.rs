use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::debug;
use snafu::prelude::*;

use crate::survey::io_common;
use crate::survey::*;

pub fn read_sheet_values(source: &SheetSource) -> RatingResult<Vec<Vec<String>>> {
    let wrange = get_range(source)?;
    debug!("read_sheet_values: range size: {:?}", wrange.get_size());

    let mut iter = wrange.rows();
    // The index starts at 1 to respect most conventions in the excel world
    for _ in 1..source.first_row {
        iter.next();
    }
    let res: Vec<Vec<String>> = iter
        .map(|row| row.iter().map(io_common::render_cell).collect())
        .collect();
    ensure!(
        !res.is_empty(),
        EmptySheetSnafu {
            path: source.path.clone()
        }
    );
    Ok(res)
}

fn get_range(source: &SheetSource) -> RatingResult<calamine::Range<DataType>> {
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        &source.path, &source.worksheet
    );
    let mut workbook: Xlsx<_> = open_workbook(&source.path).context(OpeningWorkbookSnafu {
        path: source.path.clone(),
    })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = &source.worksheet {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name.clone(),
                path: source.path.clone(),
            })?
            .context(OpeningWorkbookSnafu {
                path: source.path.clone(),
            })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptySheetSnafu {
                path: source.path.clone(),
            }
            .fail(),
            [(worksheet_name, wrange)] => {
                debug!("get_range: using the only worksheet {:?}", worksheet_name);
                Ok(wrange.clone())
            }
            _ => AmbiguousWorksheetSnafu {
                path: source.path.clone(),
            }
            .fail(),
        }
    }
}
