pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod merge;
pub mod reader;
pub mod table;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, InputConfig, OutputConfig, ReportConfig};
pub use error::{LeadMergeError, Result, UserFriendlyError};

// Core functionality re-exports
pub use export::{derive_suffix, output_file_name, CsvExporter};
pub use merge::{left_join, merge_tables, summarize, ContactNormalizer, SummaryMetrics, JOIN_KEYS};
pub use reader::{read_table, DelimitedReader};
pub use table::Table;
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of one merge run.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    pub marketing_file: PathBuf,
    pub contacts_file: PathBuf,
    pub output_file: PathBuf,
    pub metrics: SummaryMetrics,
    pub merged_columns: usize,
    pub merged_at: DateTime<Utc>,
}

/// Main library interface for LeadMerge functionality
pub struct LeadMerge {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl LeadMerge {
    /// Create a new LeadMerge instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager =
            ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create LeadMerge instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Run the full pipeline: read both files, normalize, join, summarize,
    /// write the merged CSV, and print the on-screen report.
    pub fn run_merge(&self, marketing_path: &Path, contacts_path: &Path) -> Result<MergeReport> {
        self.output_formatter.start_operation("Merging marketing list with skip-tracing contacts");

        let marketing = self.read_input(marketing_path, "Reading marketing list")?;
        self.output_formatter.debug(&format!(
            "Marketing list: {} rows, {} columns",
            marketing.row_count(),
            marketing.column_count()
        ));

        let contacts = self.read_input(contacts_path, "Reading skip-tracing contacts")?;
        self.output_formatter.debug(&format!(
            "Contacts list: {} rows, {} columns",
            contacts.row_count(),
            contacts.column_count()
        ));

        merge::normalizer::ensure_join_keys(&marketing, &marketing_path.display().to_string())?;
        let contacts = ContactNormalizer::new()
            .normalize(contacts, &contacts_path.display().to_string())?;

        let spinner = self.progress_manager.create_spinner("Merging tables...");
        let merged = merge::left_join(&marketing, &contacts);
        let metrics = merge::summarize(&merged);
        self.progress_manager.finish_spinner(&spinner, "Tables merged");

        let exporter = CsvExporter::new(self.config.output.base_directory.clone())
            .with_force_overwrite(self.config.output.force_overwrite);
        let output_file = exporter.export(&merged, contacts_path)?;

        self.output_formatter.print_metrics(&metrics);
        if self.config.report.show_preview {
            self.output_formatter
                .print_preview(&merged, self.config.report.preview_rows);
        }

        Ok(MergeReport {
            marketing_file: marketing_path.to_path_buf(),
            contacts_file: contacts_path.to_path_buf(),
            output_file,
            metrics,
            merged_columns: merged.column_count(),
            merged_at: Utc::now(),
        })
    }

    fn read_input(&self, path: &Path, operation: &str) -> Result<Table> {
        let spinner = self.progress_manager.create_spinner(&format!("{}...", operation));
        let result = reader::read_table(
            path,
            self.config.delimiter_byte(),
            self.config.input.trim,
        );
        match &result {
            Ok(table) => self.progress_manager.finish_spinner(
                &spinner,
                &format!("{}: {} rows", operation, table.row_count()),
            ),
            Err(_) => self.progress_manager.finish_spinner(&spinner, "failed"),
        }
        result
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(LeadMergeError::Io)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &LeadMergeError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function to merge two files with default settings.
pub fn merge_files_simple(
    marketing_path: &Path,
    contacts_path: &Path,
    output_dir: Option<&Path>,
) -> Result<MergeReport> {
    let mut config = Config::default();

    if let Some(output_path) = output_dir {
        config.output.base_directory = output_path.to_path_buf();
    }

    let leadmerge = LeadMerge::new(config, OutputMode::Plain, 0, true);
    leadmerge.run_merge(marketing_path, contacts_path)
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
