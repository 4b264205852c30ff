//! Reshape CLI - Command-line interface for declarative record reshaping
//!
//! This is the main entry point for the Reshape CLI application, providing
//! commands for applying transformation specs to JSON records, checking
//! specs, and managing configuration.

mod cli;
mod config;
mod error;
mod handlers;
mod input;
mod logging;
mod output;

use cli::{Cli, Commands, OutputFormat};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    let result = Config::load_with_file(cli.config.as_deref()).and_then(|config| {
        let use_color = cli.use_color() && config.output.color;
        control::set_override(use_color);

        if let Err(e) = init_logging(&cli, &config) {
            eprintln!("Failed to initialize logging: {}", e);
        }

        run(cli, &config, use_color)
    });

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: &Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = cli
        .output
        .or(config.output.format)
        .unwrap_or(OutputFormat::Human);
    let mut output = OutputWriter::new(format, use_color, cli.quiet);
    output.set_show_progress(config.output.progress);

    tracing::debug!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Apply(args) => handlers::handle_apply(args, config, &mut output),
        Commands::Check(args) => handlers::handle_check(args, config, &mut output),
        Commands::Config(args) => handlers::handle_config(args, config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);
    logging_config.merge_file_config(&config.logging, verbosity);
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["reshape", "-vv", "check", "spec.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["reshape", "--quiet", "check", "spec.json"]);
        assert_eq!(cli.verbosity_level(), 0);
        assert!(cli.quiet);
    }

    #[test]
    fn test_run_check_with_configured_transform() {
        let cli = Cli::parse_from(["reshape", "-o", "json", "check", "--transform", "missing"]);
        let err = run(cli, &Config::sample().unwrap(), false).unwrap_err();
        assert!(err.should_show_help());
    }
}
