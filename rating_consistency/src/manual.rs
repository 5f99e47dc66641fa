/*!

This is the long-form manual for `rating_consistency` and `ratecheck`.

## Input formats

The following inputs are supported by the `ratecheck` binary:
* `xlsx` Excel workbooks, typically downloaded from an online form
  (Google Forms, Microsoft Forms)
* `csv` Comma Separated Values exports of the same sheet

The provider is selected from the file extension. In both cases, the
first row of the selected block is the header and every subsequent row
is one survey response. For workbooks with several worksheets, the
worksheet name must be provided. If the header is not the first row of
the sheet, pass the 1-based row index of the header (Excel convention).

## Recognized columns

The header names are tolerant of the historical renames of the form
questions. For example, `Tool Used` and `Tool being used` resolve to the
same column, and `Overall Satisfaction` is accepted for `Overall
Rating`. A column that cannot be resolved is dropped with a warning; the
run only aborts when the overall rating, the unique id, or all four
rating axes are missing.

## Statistics

For every response, three values are derived:
* `Mean Rating`: the arithmetic mean of the rating axes that are
  present for that response. Cells that do not parse as numbers are
  treated as missing and excluded from the mean.
* `Difference`: `Mean Rating` minus `Overall Rating`.
* `Result`: `Ok` when the difference lies within `[-1, +1]` (inclusive),
  `Not ok` otherwise. A difference that cannot be computed is `Not ok`.

## Output

The scored table is written as a JSON summary (one object per response,
keyed by column title, `null` for missing values) to the standard output
or to a file. It can also be written back as an Excel workbook in which
the `Result` cells are highlighted in green (`Ok`) or red (`Not ok`).

A previously computed summary can be passed as a reference; the run then
fails with a printed diff if the scored output deviates from it.

*/
