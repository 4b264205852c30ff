//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Reshape CLI - Declarative extraction and reshaping of JSON records
///
/// Loads a transformation spec (JSON, YAML or TOML), applies it to one or
/// many records, and writes the reshaped results.
#[derive(Parser, Debug)]
#[command(
    name = "reshape",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "RESHAPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results [default: human, or the configured format]
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a transformation spec to input records
    Apply(ApplyArgs),

    /// Load a transformation spec and report its shape
    Check(CheckArgs),

    /// Inspect and initialize configuration
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the apply command
#[derive(Parser, Debug)]
pub struct ApplyArgs {
    /// Path to the transformation spec (JSON, YAML or TOML)
    #[arg(value_name = "SPEC", required_unless_present = "transform")]
    pub spec: Option<PathBuf>,

    /// Use a named transformation from the configuration instead of a file
    #[arg(short, long, value_name = "NAME", conflicts_with = "spec")]
    pub transform: Option<String>,

    /// Input file with records (stdin if omitted or '-')
    #[arg(short, long, value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Input format [default: by extension, or the configured format]
    #[arg(short, long, value_enum)]
    pub format: Option<InputFormat>,

    /// Treat a top-level JSON array as a batch of records
    #[arg(long)]
    pub each: bool,

    /// Yield null for missing fields instead of failing
    #[arg(long)]
    pub nullable: bool,

    /// What to do when a record fails [default: abort, or the configured policy]
    #[arg(long, value_enum)]
    pub on_error: Option<ErrorPolicy>,

    /// Output file path (stdout if not specified)
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the transformation spec (JSON, YAML or TOML)
    #[arg(value_name = "SPEC", required_unless_present = "transform")]
    pub spec: Option<PathBuf>,

    /// Check a named transformation from the configuration
    #[arg(short, long, value_name = "NAME", conflicts_with = "spec")]
    pub transform: Option<String>,

    /// Also print the normalized spec document
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show(ConfigShowArgs),

    /// List the configuration file locations that are searched
    Path,

    /// Write a starter configuration file
    Init(ConfigInitArgs),
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: ConfigFormat,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    pub path: Option<PathBuf>,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output (one line per record)
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Input record formats
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputFormat {
    /// A single JSON document
    #[default]
    Json,
    /// Newline-delimited JSON, one record per line
    Ndjson,
}

/// Batch policy for records that fail to transform
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Stop at the first failing record
    #[default]
    Abort,
    /// Log the failure and continue with the next record
    Skip,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify that the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: None,
            no_color: false,
            command: Commands::Check(CheckArgs {
                spec: Some(PathBuf::from("spec.json")),
                transform: None,
                detailed: false,
            }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli {
            verbose: 2,
            quiet: true,
            ..cli
        };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_apply_args() {
        let cli = Cli::parse_from([
            "reshape", "apply", "spec.yaml", "-i", "logs.ndjson", "--nullable", "--on-error", "skip",
        ]);
        match cli.command {
            Commands::Apply(args) => {
                assert_eq!(args.spec, Some(PathBuf::from("spec.yaml")));
                assert_eq!(args.input, Some(PathBuf::from("logs.ndjson")));
                assert!(args.nullable);
                assert_eq!(args.on_error, Some(ErrorPolicy::Skip));
                assert_eq!(args.format, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_apply_requires_spec_or_transform() {
        assert!(Cli::try_parse_from(["reshape", "apply"]).is_err());
        assert!(Cli::try_parse_from(["reshape", "apply", "--transform", "audit"]).is_ok());
        assert!(Cli::try_parse_from(["reshape", "apply", "s.json", "--transform", "audit"]).is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        let cli = Cli::parse_from(["reshape", "-o", "json-pretty", "check", "s.json"]);
        assert_eq!(cli.output, Some(OutputFormat::JsonPretty));
    }
}
