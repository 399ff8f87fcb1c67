use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, CheckerError>;

/// Error type covering the failures that can occur while loading source
/// exports, reconciling them, or writing the resulting reports.
///
/// Missing or empty fields inside otherwise well-formed rows are not errors:
/// they are collected in a [`ValidationReport`](crate::validate::ValidationReport).
#[derive(Debug, Error)]
pub enum CheckerError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the run summary cannot be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the CSV reader.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when a course-code pattern does not compile.
    #[error("invalid course code pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Raised when a workbook has no worksheet to read.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when an input file has an extension no reader handles.
    #[error("unsupported input file: {0}")]
    UnsupportedInput(PathBuf),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when a data row has fewer fields than its source schema declares.
    #[error("{schema} row {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        schema: &'static str,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Raised when a table row does not have one cell per column.
    #[error("table row {row}: expected {expected} cells, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Raised when a comparison names a column the joined table does not have.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
