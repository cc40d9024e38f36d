use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "leadmerge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Merge PropStream marketing lists with skip-tracing contact exports")]
#[command(
    long_about = "LeadMerge joins a PropStream marketing list with its skip-tracing contacts \
                  export on owner name and mailing address, reports skip-trace coverage, and \
                  writes the merged table as a CSV."
)]
#[command(after_help = "EXAMPLES:\n  \
    leadmerge --marketing leads.xlsx --contacts export-20230101.csv\n  \
    leadmerge -m leads.xlsx -c export-20230101.csv --output merged --force\n  \
    leadmerge -m leads.csv -c contacts.csv --output-format json --quiet\n  \
    leadmerge --generate-config")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Marketing list export (xlsx, xls, ods or csv)
    #[arg(short, long)]
    pub marketing: Option<PathBuf>,

    /// Skip-tracing contacts export (csv/tsv); the output file name is
    /// derived from this file's name
    #[arg(short, long)]
    pub contacts: Option<PathBuf>,

    /// Directory for the merged CSV (defaults to the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Field delimiter for delimited-text inputs
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Trim whitespace around fields while parsing
    #[arg(long)]
    pub trim: Option<bool>,

    /// Rows to show in the merged preview (0 disables the preview)
    #[arg(long)]
    pub preview_rows: Option<usize>,

    /// Configuration file path
    #[arg(long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Overwrite an existing merged CSV
    #[arg(long)]
    pub force: bool,

    /// Show what would be merged without executing
    #[arg(long, help = "Validate inputs and show the merge plan without merging")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        let output_dir = self.output.as_ref().map(|o| {
            if o.is_absolute() {
                o.clone()
            } else {
                std::env::current_dir().unwrap_or_default().join(o)
            }
        });

        CliOverrides::new()
            .with_delimiter(self.delimiter)
            .with_trim(self.trim)
            .with_output_dir(output_dir)
            .with_force_overwrite(self.force)
            .with_preview_rows(self.preview_rows)
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0 && !self.quiet
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cli() -> Cli {
        Cli {
            marketing: None,
            contacts: None,
            output: None,
            delimiter: None,
            trim: None,
            preview_rows: None,
            config: None,
            output_format: OutputFormat::Human,
            verbose: 0,
            quiet: false,
            force: false,
            dry_run: false,
            generate_config: false,
        }
    }

    #[test]
    fn test_cli_overrides_resolve_relative_output() {
        let cli = Cli {
            output: Some(PathBuf::from("merged")),
            force: true,
            ..base_cli()
        };

        let overrides = cli.create_cli_overrides();
        let output_dir = overrides.output_dir.unwrap();
        assert!(output_dir.is_absolute());
        assert!(output_dir.ends_with("merged"));
        assert!(overrides.force_overwrite);
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            ..base_cli()
        };
        assert_eq!(cli.verbosity_level(), 2);
        assert!(cli.is_verbose());

        let cli = Cli {
            verbose: 0,
            quiet: true,
            ..base_cli()
        };
        assert_eq!(cli.verbosity_level(), 0);
        assert!(!cli.is_verbose());
    }
}
