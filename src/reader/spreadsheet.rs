use crate::error::{LeadMergeError, Result};
use crate::table::Table;
use calamine::{open_workbook_auto, DataType, Reader};
use std::path::Path;

/// Read the first worksheet of an Excel/ODS workbook into a [`Table`].
///
/// The first row is the header. Empty cells become null cells; everything
/// else is carried as its textual representation, which is what the composite
/// join key compares.
pub fn read_spreadsheet(path: &Path) -> Result<Table> {
    let file_name = path.display().to_string();

    let mut workbook = open_workbook_auto(path).map_err(|e| LeadMergeError::Parse {
        file: file_name.clone(),
        message: format!("failed to open workbook: {}", e),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LeadMergeError::Parse {
            file: file_name.clone(),
            message: "workbook contains no worksheets".to_string(),
        })?
        .map_err(|e| LeadMergeError::Parse {
            file: file_name.clone(),
            message: format!("failed to read worksheet: {}", e),
        })?;

    let mut rows = range.rows();

    let header = rows.next().ok_or_else(|| LeadMergeError::Parse {
        file: file_name.clone(),
        message: "worksheet is empty (no header row)".to_string(),
    })?;

    let columns: Vec<String> = header
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();

    let mut table = Table::new(columns);
    for row in rows {
        table.push_row(row.iter().map(cell_text).collect());
    }

    Ok(table)
}

/// Textual form of a worksheet cell, `None` when the cell is empty.
///
/// Numeric cells render without a decimal point when integral, so a zip code
/// stored as the number 62704 comes back as "62704".
fn cell_text<T: DataType + std::fmt::Display>(cell: &T) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell.as_string().unwrap_or_else(|| cell.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_unreadable_workbook_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("leads.xlsx");
        fs::write(&path, b"this is not a zip archive").unwrap();

        let result = read_spreadsheet(&path);
        assert!(matches!(result, Err(LeadMergeError::Parse { .. })));
    }
}
