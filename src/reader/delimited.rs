use crate::error::{LeadMergeError, Result};
use crate::table::Table;
use csv::{ReaderBuilder, Trim};
use std::fs;
use std::path::Path;

/// Reader for delimited-text exports (CSV and friends).
///
/// Empty fields become null cells. Rows shorter or longer than the header are
/// accepted and padded/truncated to the header width, since real-world exports
/// are rarely perfectly rectangular.
pub struct DelimitedReader {
    delimiter: u8,
    trim: bool,
}

impl Default for DelimitedReader {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: false,
        }
    }
}

impl DelimitedReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Trim whitespace around fields. Off by default: the join compares key
    /// values byte-for-byte, so input text is left untouched.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn read_path(&self, path: &Path) -> Result<Table> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        self.read_str(&content, &path.display().to_string())
    }

    pub fn read_str(&self, content: &str, source_name: &str) -> Result<Table> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader.headers().map_err(|e| LeadMergeError::Parse {
            file: source_name.to_string(),
            message: format!("failed to read header row: {}", e),
        })?;

        let columns: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let mut table = Table::new(columns);

        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| LeadMergeError::Parse {
                file: source_name.to_string(),
                message: format!("failed to parse row {}: {}", index + 1, e),
            })?;

            let row = record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        None
                    } else {
                        Some(field.to_string())
                    }
                })
                .collect();
            table.push_row(row);
        }

        Ok(table)
    }
}
