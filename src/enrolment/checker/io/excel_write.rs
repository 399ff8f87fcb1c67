use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::enrolment::checker::error::Result;
use crate::enrolment::checker::model::Table;

/// Writes the table to a single-sheet workbook at `path`. Null cells are
/// left blank.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_idx, header) in table.columns().iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, header)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            if let Some(value) = cell {
                worksheet.write_string((row_idx + 1) as u32, col_idx as u16, value)?;
            }
        }
    }

    if !table.is_empty() && !table.columns().is_empty() {
        let mut excel_table = rust_xlsxwriter::Table::new();
        excel_table.set_autofilter(true);
        let col_end = (table.columns().len() as u16).saturating_sub(1);
        worksheet.add_table(0, 0, table.len() as u32, col_end, &excel_table)?;
    }

    workbook.save(path)?;
    Ok(())
}
