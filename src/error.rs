use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeadMergeError {
    #[error("Required input file not supplied")]
    MissingInput { marketing: bool, contacts: bool },

    #[error("File {file} is missing required column(s): {}", .missing_columns.join(", "))]
    SchemaMismatch {
        file: String,
        missing_columns: Vec<String>,
    },

    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Unsupported file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("Output file already exists: {path}")]
    OutputFileExists { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for LeadMergeError {
    fn user_message(&self) -> String {
        match self {
            LeadMergeError::MissingInput {
                marketing,
                contacts,
            } => match (marketing, contacts) {
                (true, true) => {
                    "Please upload the Marketing List AND Skip Tracing List file".to_string()
                }
                (true, false) => "Please upload the Marketing List file".to_string(),
                (false, true) => "Please upload the Skip Tracing List file".to_string(),
                (false, false) => "All required input files are present".to_string(),
            },
            LeadMergeError::SchemaMismatch {
                file,
                missing_columns,
            } => format!(
                "File {} is missing required column(s): {}",
                file,
                missing_columns.join(", ")
            ),
            LeadMergeError::Parse { file, message } => {
                format!("Could not read {}: {}", file, message)
            }
            LeadMergeError::UnsupportedFormat { path } => {
                format!("Unsupported file format: {}", path)
            }
            LeadMergeError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            LeadMergeError::OutputFileExists { path } => {
                format!("Output file already exists: {}", path)
            }
            LeadMergeError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            LeadMergeError::MissingInput { .. } => Some(
                "Pass the marketing list with --marketing and the skip-tracing contacts list with --contacts.".to_string(),
            ),
            LeadMergeError::SchemaMismatch { .. } => Some(
                "Check that the file was exported from PropStream with its original header row intact.".to_string(),
            ),
            LeadMergeError::Parse { .. } => Some(
                "Verify the file is a well-formed CSV or Excel export and is not open in another program.".to_string(),
            ),
            LeadMergeError::UnsupportedFormat { .. } => Some(
                "Supported input formats are .csv, .tsv, .txt, .xlsx, .xls, .xlsm and .ods.".to_string(),
            ),
            LeadMergeError::OutputFileExists { .. } => Some(
                "Remove the existing file, choose a different output directory with --output, or use --force to overwrite.".to_string(),
            ),
            LeadMergeError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string(),
            ),
            _ => None,
        }
    }
}

impl From<csv::Error> for LeadMergeError {
    fn from(error: csv::Error) -> Self {
        let message = error.to_string();
        match error.into_kind() {
            csv::ErrorKind::Io(e) => LeadMergeError::Io(e),
            _ => LeadMergeError::Parse {
                file: "delimited input".to_string(),
                message,
            },
        }
    }
}

impl From<toml::de::Error> for LeadMergeError {
    fn from(error: toml::de::Error) -> Self {
        LeadMergeError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LeadMergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_messages() {
        let both = LeadMergeError::MissingInput {
            marketing: true,
            contacts: true,
        };
        assert_eq!(
            both.user_message(),
            "Please upload the Marketing List AND Skip Tracing List file"
        );

        let marketing_only = LeadMergeError::MissingInput {
            marketing: true,
            contacts: false,
        };
        assert_eq!(
            marketing_only.user_message(),
            "Please upload the Marketing List file"
        );

        let contacts_only = LeadMergeError::MissingInput {
            marketing: false,
            contacts: true,
        };
        assert_eq!(
            contacts_only.user_message(),
            "Please upload the Skip Tracing List file"
        );
    }

    #[test]
    fn test_schema_mismatch_names_columns() {
        let error = LeadMergeError::SchemaMismatch {
            file: "contacts.csv".to_string(),
            missing_columns: vec!["Mail City".to_string(), "Mail Zip".to_string()],
        };
        let message = error.user_message();
        assert!(message.contains("contacts.csv"));
        assert!(message.contains("Mail City"));
        assert!(message.contains("Mail Zip"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_parse_error_is_readable() {
        let error = LeadMergeError::Parse {
            file: "leads.xlsx".to_string(),
            message: "no worksheet found".to_string(),
        };
        assert!(error.user_message().contains("leads.xlsx"));
        assert!(error.suggestion().is_some());
    }
}
