use clap::Parser;

/// Audits survey rating spreadsheets for self-consistency.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The spreadsheet containing the survey responses. Excel (.xlsx) and CSV
    /// inputs are supported, selected by the file extension.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (file path) A reference file containing a previously computed summary in JSON format.
    /// If provided, ratecheck will check that the scored output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the scored summary will be written in
    /// JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) If specified, the scored table will be written as an Excel workbook with
    /// the Result cells highlighted in green (Ok) or red (Not ok).
    #[clap(short, long, value_parser)]
    pub write_back: Option<String>,

    /// (default: the only worksheet) When using an Excel file, indicates the name of the
    /// worksheet to use.
    #[clap(long, value_parser)]
    pub worksheet: Option<String>,

    /// (default 1) The 1-based index of the header row, following the Excel convention.
    /// Rows above it are ignored.
    #[clap(long, value_parser)]
    pub first_row: Option<usize>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
