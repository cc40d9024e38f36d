use crate::error::{LeadMergeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// Field delimiter for delimited-text inputs. Single ASCII character.
    pub delimiter: String,
    /// Trim whitespace around fields while parsing. Off by default: the join
    /// compares key text byte-for-byte.
    pub trim: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub base_directory: PathBuf,
    pub force_overwrite: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// How many merged rows to show in the on-screen preview.
    pub preview_rows: usize,
    pub show_preview: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            output: OutputConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            trim: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_directory: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force_overwrite: false,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            preview_rows: 10,
            show_preview: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LeadMergeError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| LeadMergeError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| LeadMergeError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["leadmerge.toml", ".leadmerge.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(delimiter) = cli_args.delimiter {
            self.input.delimiter = delimiter.to_string();
        }

        if let Some(trim) = cli_args.trim {
            self.input.trim = trim;
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.base_directory = output_dir.clone();
        }

        if cli_args.force_overwrite {
            self.output.force_overwrite = true;
        }

        if let Some(preview_rows) = cli_args.preview_rows {
            self.report.preview_rows = preview_rows;
            self.report.show_preview = preview_rows > 0;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| LeadMergeError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| LeadMergeError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.delimiter.len() != 1 || !self.input.delimiter.is_ascii() {
            return Err(LeadMergeError::Config {
                message: format!(
                    "Delimiter must be a single ASCII character, got {:?}",
                    self.input.delimiter
                ),
            });
        }

        if let Some(parent) = self.output.base_directory.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(LeadMergeError::Config {
                    message: format!("Parent directory does not exist: {}", parent.display()),
                });
            }
        }

        Ok(())
    }

    pub fn delimiter_byte(&self) -> u8 {
        self.input.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }

    pub fn create_sample_config() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub delimiter: Option<char>,
    pub trim: Option<bool>,
    pub output_dir: Option<PathBuf>,
    pub force_overwrite: bool,
    pub preview_rows: Option<usize>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: Option<char>) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_trim(mut self, trim: Option<bool>) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    pub fn with_preview_rows(mut self, preview_rows: Option<usize>) -> Self {
        self.preview_rows = preview_rows;
        self
    }
}
