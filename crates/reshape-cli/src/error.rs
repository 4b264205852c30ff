//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from reshape-core while loading a spec
    #[error("{0}")]
    Core(#[from] reshape_core::Error),

    /// A record failed to transform under the abort policy
    #[error("Record {index} failed: {source}")]
    Record {
        index: usize,
        #[source]
        source: reshape_core::Error,
    },

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Unparseable input record
    #[error("Invalid input at line {line}: {message}")]
    InvalidInput { line: usize, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Named transformation missing from the configuration
    #[error("Transformation '{}' not found in configuration (available: {})", name, available.join(", "))]
    TransformNotFound { name: String, available: Vec<String> },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(_) => 2,
            Self::Record { .. } => 3,
            Self::FileNotFound { .. } => 4,
            Self::InvalidInput { .. } => 5,
            Self::Config(_) => 6,
            Self::TransformNotFound { .. } => 7,
            Self::Json(_) => 8,
            Self::Yaml(_) => 9,
            Self::Toml(_) | Self::TomlSer(_) => 10,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::TransformNotFound { .. })
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            Error::Io(io::Error::new(io::ErrorKind::Other, "x")),
            Error::Core(reshape_core::Error::malformed("1", "x")),
            Error::Record {
                index: 0,
                source: reshape_core::Error::field_missing("a", &json!({})),
            },
            Error::FileNotFound { path: PathBuf::from("a") },
            Error::InvalidInput { line: 1, message: "x".into() },
            Error::config("x"),
            Error::other("x"),
        ];
        let mut codes: Vec<i32> = errors.iter().map(Error::exit_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_record_error_display() {
        let err = Error::Record {
            index: 4,
            source: reshape_core::Error::field_missing("user", &json!({"id": 1})),
        };
        assert_eq!(
            err.to_string(),
            "Record 4 failed: Field missing: 'user' not found in mapping with keys [id]"
        );
    }

    #[test]
    fn test_transform_not_found_display() {
        let err = Error::TransformNotFound {
            name: "audit".into(),
            available: vec!["redact".into(), "project".into()],
        };
        assert!(err.to_string().contains("available: redact, project"));
        assert!(err.should_show_help());
    }

    #[test]
    fn test_format_error_plain() {
        let err = Error::config("bad level");
        assert_eq!(format_error(&err, false), "Error: Configuration error: bad level");
    }
}
