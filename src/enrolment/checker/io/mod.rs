//! Row sources for the two exports and the workbook writer used for results.

pub mod csv_read;
pub mod excel_read;
pub mod excel_write;

use std::path::Path;

use tracing::{info, instrument};

use crate::enrolment::checker::error::{CheckerError, Result};
use crate::enrolment::checker::model::{DatabaseRow, PlatformRow};

/// One data row as read from an export, before it is given a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Row number in the source file, counting the header as row 1.
    pub line: usize,
    pub fields: Vec<String>,
}

/// Reads the data rows of a `.csv` or `.xlsx` export. The header row is
/// skipped and rows with an empty first field are dropped.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    if !path.exists() {
        return Err(CheckerError::MissingInput(path.to_path_buf()));
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let rows = match extension.as_deref() {
        Some("csv") => csv_read::read_rows(path)?,
        Some("xlsx") | Some("xlsm") => excel_read::read_rows(path)?,
        _ => return Err(CheckerError::UnsupportedInput(path.to_path_buf())),
    };
    let rows: Vec<RawRow> = rows
        .into_iter()
        .filter(|row| row.fields.first().is_some_and(|id| !id.is_empty()))
        .collect();
    info!(row_count = rows.len(), "read export rows");
    Ok(rows)
}

/// Loads a student database export into typed rows.
pub fn load_database(path: &Path) -> Result<Vec<DatabaseRow>> {
    read_rows(path)?
        .into_iter()
        .map(|row| DatabaseRow::from_fields(row.line, row.fields))
        .collect()
}

/// Loads a learning platform export into typed rows.
pub fn load_platform(path: &Path) -> Result<Vec<PlatformRow>> {
    read_rows(path)?
        .into_iter()
        .map(|row| PlatformRow::from_fields(row.line, row.fields))
        .collect()
}
