use crate::error::{LeadMergeError, Result};
use crate::table::Table;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the merged table as a UTF-8 CSV download artifact.
///
/// The original tool cached the serialized bytes per table for repeat
/// downloads; volumes are small enough that this exporter just serializes on
/// every run.
pub struct CsvExporter {
    output_directory: PathBuf,
    force_overwrite: bool,
}

impl CsvExporter {
    pub fn new(output_directory: PathBuf) -> Self {
        Self {
            output_directory,
            force_overwrite: false,
        }
    }

    pub fn with_force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    /// Serialize `table` to `<output_directory>/marketing_skip_trace_<suffix>.csv`,
    /// with the suffix derived from the contacts file name. Null cells become
    /// empty fields. Returns the path written.
    pub fn export(&self, table: &Table, contacts_path: &Path) -> Result<PathBuf> {
        let output_path = self.output_path(contacts_path);

        if output_path.exists() && !self.force_overwrite {
            return Err(LeadMergeError::OutputFileExists {
                path: output_path.display().to_string(),
            });
        }

        if !self.output_directory.exists() {
            fs::create_dir_all(&self.output_directory)?;
        }

        let mut writer = csv::Writer::from_path(&output_path)?;
        writer.write_record(table.columns())?;
        for row in table.rows() {
            writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        }
        writer.flush()?;

        Ok(output_path)
    }

    pub fn output_path(&self, contacts_path: &Path) -> PathBuf {
        self.output_directory.join(output_file_name(contacts_path))
    }
}

/// Download file name for a given contacts export:
/// `marketing_skip_trace_<suffix>.csv`.
pub fn output_file_name(contacts_path: &Path) -> String {
    format!("marketing_skip_trace_{}.csv", derive_suffix(contacts_path))
}

/// Suffix from the contacts file name: the last `-`-separated segment with
/// everything from the first `.` on removed (`export-20230101.csv` →
/// `20230101`).
pub fn derive_suffix(contacts_path: &Path) -> String {
    let file_name = contacts_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    file_name
        .rsplit('-')
        .next()
        .unwrap_or(file_name)
        .split('.')
        .next()
        .unwrap_or("")
        .to_string()
}
