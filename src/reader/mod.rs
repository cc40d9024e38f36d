pub mod delimited;
pub mod spreadsheet;

pub use delimited::DelimitedReader;
pub use spreadsheet::read_spreadsheet;

use crate::error::{LeadMergeError, Result};
use crate::table::Table;
use std::path::Path;

/// Extensions handled by the delimited-text reader.
pub const DELIMITED_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// Extensions handled by the spreadsheet reader.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb", "ods"];

/// Read a tabular file into a [`Table`], dispatching on the file extension.
///
/// `delimiter` applies only to delimited-text files; `.tsv` always uses a tab.
pub fn read_table(path: &Path, delimiter: u8, trim: bool) -> Result<Table> {
    if !path.exists() {
        return Err(LeadMergeError::InvalidPath {
            path: path.display().to_string(),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        read_spreadsheet(path)
    } else if DELIMITED_EXTENSIONS.contains(&extension.as_str()) {
        let delimiter = if extension == "tsv" { b'\t' } else { delimiter };
        DelimitedReader::new()
            .with_delimiter(delimiter)
            .with_trim(trim)
            .read_path(path)
    } else {
        Err(LeadMergeError::UnsupportedFormat {
            path: path.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dispatch_rejects_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("leads.pdf");
        fs::write(&path, b"not a table").unwrap();

        let result = read_table(&path, b',', false);
        assert!(matches!(
            result,
            Err(LeadMergeError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_dispatch_rejects_missing_file() {
        let result = read_table(Path::new("/nonexistent/leads.csv"), b',', false);
        assert!(matches!(result, Err(LeadMergeError::InvalidPath { .. })));
    }

    #[test]
    fn test_dispatch_reads_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("leads.csv");
        fs::write(&path, "First Name,Last Name\nJane,Doe\n").unwrap();

        let table = read_table(&path, b',', false).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.value(0, "First Name"), Some("Jane"));
    }

    #[test]
    fn test_tsv_forces_tab_delimiter() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("leads.tsv");
        fs::write(&path, "First Name\tLast Name\nJane\tDoe\n").unwrap();

        let table = read_table(&path, b',', false).unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.value(0, "Last Name"), Some("Doe"));
    }
}
