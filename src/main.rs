use clap::Parser;
use leadmerge::{
    output_file_name, Cli, LeadMerge, LeadMergeError, OutputFormatter, OutputMode,
    UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    // Create LeadMerge instance
    let leadmerge = match LeadMerge::from_cli(&cli) {
        Ok(leadmerge) => leadmerge,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    // The merge is refused until both inputs are supplied; the messages are
    // advisory, matching the upload-step prompts of the original tool.
    let (marketing_path, contacts_path) = match (cli.marketing.as_ref(), cli.contacts.as_ref()) {
        (Some(marketing), Some(contacts)) => (marketing, contacts),
        (marketing, contacts) => {
            leadmerge.handle_error(&LeadMergeError::MissingInput {
                marketing: marketing.is_none(),
                contacts: contacts.is_none(),
            });
            return 2;
        }
    };

    // Handle dry run mode
    if cli.dry_run {
        return handle_dry_run(&leadmerge, marketing_path, contacts_path);
    }

    // Execute main merge workflow
    match leadmerge.run_merge(marketing_path, contacts_path) {
        Ok(report) => {
            leadmerge.output_formatter().print_merge_report(&report);
            0
        }
        Err(e) => {
            leadmerge.handle_error(&e);

            // Map error types to appropriate exit codes
            match e {
                LeadMergeError::MissingInput { .. } => 2,
                LeadMergeError::SchemaMismatch { .. } => 3,
                LeadMergeError::Parse { .. } => 4,
                LeadMergeError::UnsupportedFormat { .. } => 5,
                LeadMergeError::InvalidPath { .. } => 6,
                LeadMergeError::OutputFileExists { .. } => 7,
                _ => 1, // General error
            }
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "leadmerge.toml".to_string());

    match LeadMerge::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!(
                "  leadmerge --marketing <file> --contacts <file> --config {}",
                config_path
            );
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(
    leadmerge: &LeadMerge,
    marketing_path: &std::path::Path,
    contacts_path: &std::path::Path,
) -> i32 {
    let formatter = leadmerge.output_formatter();

    formatter.info("DRY RUN MODE - No files will be merged");
    formatter.print_separator();

    for (label, path) in [
        ("Marketing list", marketing_path),
        ("Contacts list", contacts_path),
    ] {
        if path.exists() {
            formatter.success(&format!("{}: {}", label, path.display()));
        } else {
            formatter.error(&format!("{} not found: {}", label, path.display()));
            return 6;
        }
    }

    let config = leadmerge.config();
    formatter.info("Configuration that would be used:");
    println!("  Delimiter: {:?}", config.input.delimiter);
    println!("  Trim fields: {}", config.input.trim);
    println!(
        "  Output directory: {}",
        config.output.base_directory.display()
    );
    println!("  Force overwrite: {}", config.output.force_overwrite);
    println!("  Preview rows: {}", config.report.preview_rows);

    formatter.print_separator();
    formatter.info("Merge plan:");
    println!("  Output file: {}", output_file_name(contacts_path));

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to perform the merge");

    0
}

fn print_startup_error(error: &LeadMergeError) {
    // Basic formatter for errors raised before configuration is loaded
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadmerge::{Config, OutputFormat};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn base_cli() -> Cli {
        Cli {
            marketing: None,
            contacts: None,
            output: None,
            delimiter: None,
            trim: None,
            preview_rows: None,
            config: None,
            output_format: OutputFormat::Plain,
            verbose: 0,
            quiet: true,
            force: false,
            dry_run: false,
            generate_config: false,
        }
    }

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let cli = Cli {
            config: Some(config_path.clone()),
            generate_config: true,
            ..base_cli()
        };

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);
        assert!(config_path.exists());

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[input]"));
        assert!(content.contains("[report]"));
    }

    #[test]
    fn test_dry_run_mode() {
        let temp_dir = TempDir::new().unwrap();
        let marketing = temp_dir.path().join("leads.csv");
        let contacts = temp_dir.path().join("export-1.csv");
        fs::write(&marketing, "Owner 1 First Name\n").unwrap();
        fs::write(&contacts, "First Name\n").unwrap();

        let leadmerge = LeadMerge::new(Config::default(), OutputMode::Plain, 0, true);
        assert_eq!(handle_dry_run(&leadmerge, &marketing, &contacts), 0);
    }

    #[test]
    fn test_dry_run_missing_file() {
        let leadmerge = LeadMerge::new(Config::default(), OutputMode::Plain, 0, true);
        let exit_code = handle_dry_run(
            &leadmerge,
            &PathBuf::from("/nonexistent/leads.csv"),
            &PathBuf::from("/nonexistent/export-1.csv"),
        );
        assert_eq!(exit_code, 6);
    }
}
