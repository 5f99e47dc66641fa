// ********* Input data structures ***********

use log::warn;
use std::error::Error;
use std::fmt::Display;

/// The canonical fields of a survey response.
///
/// Each field carries the set of header names under which it may appear
/// in the source sheet (the form builders renamed several questions over
/// time), and the fixed title it gets in the destination schema.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Field {
    EmailAddress,
    ToolUsed,
    FeatureUsed,
    ContextAwareness,
    Autonomy,
    Experience,
    OutputQuality,
    OverallRating,
    UniqueId,
}

impl Field {
    /// All the canonical fields, in the destination column order.
    pub const ALL: [Field; 9] = [
        Field::EmailAddress,
        Field::ToolUsed,
        Field::FeatureUsed,
        Field::ContextAwareness,
        Field::Autonomy,
        Field::Experience,
        Field::OutputQuality,
        Field::OverallRating,
        Field::UniqueId,
    ];

    /// The four rating axes that get averaged.
    pub const RATING_AXES: [Field; 4] = [
        Field::ContextAwareness,
        Field::Autonomy,
        Field::Experience,
        Field::OutputQuality,
    ];

    /// The column title in the destination schema.
    pub fn title(&self) -> &'static str {
        match self {
            Field::EmailAddress => "Email address",
            Field::ToolUsed => "Tool being used",
            Field::FeatureUsed => "Feature used",
            Field::ContextAwareness => "Context Awareness",
            Field::Autonomy => "Autonomy",
            Field::Experience => "Experience",
            Field::OutputQuality => "Output Quality",
            Field::OverallRating => "Overall Rating",
            Field::UniqueId => "Unique ID",
        }
    }

    /// The header names accepted for this field, historical form names
    /// first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::EmailAddress => &["Email Address", "Email address"],
            Field::ToolUsed => &["Tool Used", "Tool being used"],
            Field::FeatureUsed => &["Feature", "Feature used"],
            Field::ContextAwareness => &["Context Awareness Rating", "Context Awareness"],
            Field::Autonomy => &["Autonomy Rating", "Autonomy"],
            Field::Experience => &["Experience Rating", "Experience"],
            Field::OutputQuality => &["Output Quality Rating", "Output Quality"],
            Field::OverallRating => &["Overall Satisfaction", "Overall Rating"],
            Field::UniqueId => &["Unique ID"],
        }
    }

    /// True for the columns that are parsed as numeric ratings.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Field::ContextAwareness
                | Field::Autonomy
                | Field::Experience
                | Field::OutputQuality
                | Field::OverallRating
        )
    }
}

/// A table restricted to the canonical columns that were resolved from
/// the input header, in canonical order. Row order and row count match
/// the data rows of the input.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct NormalizedTable {
    pub fields: Vec<Field>,
    pub rows: Vec<Vec<String>>,
}

// ******** Output data structures *********

/// A column of the scored table: either a source column carried through
/// the normalizer, or one of the three derived statistics.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Column {
    Source(Field),
    MeanRating,
    Difference,
    Result,
}

impl Column {
    pub fn title(&self) -> &'static str {
        match self {
            Column::Source(field) => field.title(),
            Column::MeanRating => "Mean Rating",
            Column::Difference => "Difference",
            Column::Result => "Result",
        }
    }
}

/// A single value of the scored table. Missing ratings and undefined
/// statistics are `Empty`, never an error.
#[derive(PartialEq, Debug, Clone)]
pub enum ScoredCell {
    Text(String),
    Number(f64),
    Empty,
}

/// The normalized table extended with the derived statistics.
#[derive(PartialEq, Debug, Clone)]
pub struct ScoredTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<ScoredCell>>,
}

/// The inclusive band within which a self-reported overall rating is
/// considered consistent with the averaged axes.
pub const TOLERANCE: f64 = 1.0;

/// The two-valued outcome of the consistency check.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Verdict {
    Ok,
    NotOk,
}

impl Verdict {
    /// Classifies a difference against the tolerance band. A missing
    /// difference is not classifiable and counts as inconsistent.
    pub fn classify(difference: Option<f64>) -> Verdict {
        match difference {
            Some(d) if (-TOLERANCE..=TOLERANCE).contains(&d) => Verdict::Ok,
            _ => Verdict::NotOk,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Ok => "Ok",
            Verdict::NotOk => "Not ok",
        }
    }
}

/// Errors that prevent the normalization from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ConsistencyErrors {
    /// The input had no rows at all, or a header with no data rows.
    EmptyTable,
    /// The required subset of columns could not be resolved. Carries the
    /// titles of the missing columns.
    MissingColumns(Vec<String>),
}

impl Error for ConsistencyErrors {}

impl Display for ConsistencyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsistencyErrors::EmptyTable => write!(f, "No data found in the input table"),
            ConsistencyErrors::MissingColumns(missing) => {
                write!(f, "Missing required columns: {}", missing.join(", "))
            }
        }
    }
}

// ********* Diagnostics **********

/// Receives the non-fatal diagnostics of the two components.
///
/// The components never touch process-wide logging configuration; the
/// caller injects the sink it wants.
pub trait Observer {
    /// None of the aliases of `field` was found in the input header.
    fn column_missing(&self, field: Field);

    /// A rating cell did not parse as a number. The value becomes
    /// missing and the row continues.
    fn cell_unparsable(&self, lineno: usize, field: Field, content: &str);
}

/// Forwards every notification to the `log` facade. The right choice for
/// binaries.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn column_missing(&self, field: Field) {
        warn!(
            "Column '{}' not found in sheet (accepted names: {:?})",
            field.title(),
            field.aliases()
        );
    }

    fn cell_unparsable(&self, lineno: usize, field: Field, content: &str) {
        warn!(
            "Line {}: cannot parse '{}' value {:?} as a rating, treating it as missing",
            lineno,
            field.title(),
            content
        );
    }
}
