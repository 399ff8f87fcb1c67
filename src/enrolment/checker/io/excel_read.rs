use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use chrono::{Duration, NaiveDate};

use crate::enrolment::checker::error::{CheckerError, Result};
use crate::enrolment::checker::io::RawRow;

/// Reads the rows after the header of the first worksheet in a workbook.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CheckerError::InvalidWorkbook("workbook has no worksheets".into()))?
        .map_err(CheckerError::from)?;

    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let rows = range
        .rows()
        .enumerate()
        .skip(1)
        .map(|(index, cells)| RawRow {
            line: first_row + index + 1,
            fields: cells.iter().map(cell_to_string).collect(),
        })
        .collect();
    Ok(rows)
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) if value.fract() == 0.0 => format!("{value:.0}"),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::DateTime(serial) => serial_to_iso(*serial).unwrap_or_else(|| serial.to_string()),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Converts an Excel 1900-system serial date to `YYYY-MM-DDTHH:MM:SS`.
fn serial_to_iso(serial: f64) -> Option<String> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    let moment = epoch.checked_add_signed(Duration::milliseconds(millis))?;
    Some(moment.format("%Y-%m-%dT%H:%M:%S").to_string())
}
