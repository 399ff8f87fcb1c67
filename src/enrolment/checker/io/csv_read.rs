use std::path::Path;

use crate::enrolment::checker::error::Result;
use crate::enrolment::checker::io::RawRow;

/// Reads every record after the header of a comma-separated file. Records
/// may have differing lengths; schema checks happen when rows are typed.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        rows.push(RawRow {
            line: index + 2,
            fields: record.iter().map(|field| field.to_string()).collect(),
        });
    }
    Ok(rows)
}
