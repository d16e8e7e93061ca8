//! Error types for the classtime core.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Token-level failure while interpreting a free-text input field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unrecognized weekday token '{0}'")]
    InvalidWeekday(String),

    #[error("unrecognized part-of-day token '{0}'")]
    InvalidPartOfDay(String),

    #[error("unable to interpret '{0}' as a boolean")]
    InvalidBoolean(String),

    #[error("invalid teacher id '{id}': {reason}")]
    InvalidTeacherId { id: String, reason: &'static str },

    #[error("no weekday at the start of timeslot segment '{segment}' (while parsing '{input}')")]
    MissingWeekday { segment: String, input: String },

    #[error("no time ranges in timeslot segment '{segment}' (while parsing '{input}')")]
    MissingTimeRange { segment: String, input: String },

    #[error("malformed time '{0}', expected HH:MM")]
    InvalidTime(String),
}

/// A field that parsed but falls outside its allowed range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for '{field}': {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Failure raised while converting a single tabular record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Every row-level error found in one input file, reported together
/// so the user can fix the whole file in a single pass.
#[derive(Debug, Error)]
#[error("{}", self.render())]
pub struct ParsingError {
    /// Logical name of the input file (e.g. `courses`).
    pub file: String,
    /// 1-based data row number paired with the failure.
    pub errors: Vec<(usize, RowError)>,
}

impl ParsingError {
    fn render(&self) -> String {
        let mut out = format!("errors found while parsing input file '{}':", self.file);
        for (row, err) in &self.errors {
            out.push_str(&format!("\n * row {row}: {err}"));
        }
        out
    }
}

/// Fatal cross-entity inconsistency. Lists every offender found,
/// not just the first.
#[derive(Debug, Error)]
#[error("{}", self.render())]
pub struct InconsistentInputError {
    pub issues: Vec<String>,
}

impl InconsistentInputError {
    fn render(&self) -> String {
        let mut out = String::from("inconsistent input dataset:");
        for issue in &self.issues {
            out.push_str(&format!("\n * {issue}"));
        }
        out
    }
}

/// A file the scheduler expects is missing or unreadable.
#[derive(Debug, Error)]
#[error("unable to read {role} file '{}': {source}", path.display())]
pub struct FileTreeError {
    /// Logical role of the file (e.g. "input", "base model").
    pub role: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Any fatal error raised while loading and validating the input dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error("input file '{file}' has an unexpected header: missing columns {missing:?}")]
    Header {
        file: String,
        missing: Vec<&'static str>,
    },

    #[error("unable to read records from input file '{file}': {source}")]
    Malformed {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Inconsistent(#[from] InconsistentInputError),

    #[error(transparent)]
    FileTree(#[from] FileTreeError),
}

impl DataError {
    /// Whether the failure is an I/O problem rather than bad data.
    pub fn is_io(&self) -> bool {
        matches!(self, DataError::FileTree(_))
    }
}
