//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Environment variables (`RESHAPE_CONFIG`, via the CLI layer)
//!
//! Besides defaults for the apply command, a configuration file can hold
//! named transformation specs that `apply --transform NAME` refers to.

use crate::cli::{ErrorPolicy, InputFormat, OutputFormat};
use crate::error::{Error, Result};
use reshape_core::TransformSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for the apply command
    pub defaults: DefaultsConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Named transformation specs
    pub transforms: BTreeMap<String, TransformSpec>,
}

/// Defaults applied when the command line does not say otherwise
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Yield null for missing fields
    pub nullable: bool,

    /// Batch policy for failing records
    pub on_error: ErrorPolicy,

    /// Input format when it cannot be told from the file extension
    pub input_format: InputFormat,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: Option<OutputFormat>,

    /// Use colored output by default
    pub color: bool,

    /// Show progress bars for large batches
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,

    /// Log file path
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            progress: true,
        }
    }
}

/// Supported configuration file syntaxes, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSyntax {
    Json,
    Yaml,
    Toml,
}

impl FileSyntax {
    /// Pick the syntax for `path`, JSON unless the extension says otherwise
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => FileSyntax::Yaml,
            Some("toml") => FileSyntax::Toml,
            _ => FileSyntax::Json,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = match FileSyntax::from_path(path) {
            FileSyntax::Yaml => serde_yaml::from_str(&content)?,
            FileSyntax::Toml => toml::from_str(&content)?,
            FileSyntax::Json => serde_json::from_str(&content)?,
        };

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check, in priority order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Current directory
        for name in [".reshape.yaml", ".reshape.json", ".reshape.toml"] {
            paths.push(PathBuf::from(name));
        }

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let reshape_dir = config_dir.join("reshape");
            for name in ["config.yaml", "config.json", "config.toml"] {
                paths.push(reshape_dir.join(name));
            }
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            for name in [".reshape.yaml", ".reshape.json", ".reshape.toml"] {
                paths.push(home_dir.join(name));
            }
        }

        paths
    }

    /// Default location for `config init`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("reshape").join("config.yaml"))
    }

    /// Look up a named transformation
    pub fn transform(&self, name: &str) -> Result<&TransformSpec> {
        self.transforms
            .get(name)
            .ok_or_else(|| Error::TransformNotFound {
                name: name.to_string(),
                available: self.transforms.keys().cloned().collect(),
            })
    }

    /// A starter configuration with one example transformation
    pub fn sample() -> Result<Self> {
        let redact = TransformSpec::from_value(&serde_json::json!([
            "timestamp",
            "level",
            "message",
            {"$rename": {"from": "request.id", "to": "request_id"}},
            {"$mask": {
                "field": "request.headers.authorization",
                "pattern": "^(Bearer \\w{4})\\w+$",
                "replacement": "\\1****"
            }},
            {"$nullable": {"field": "user.id"}}
        ]))?;

        let mut config = Self::default();
        config.transforms.insert("redact-access-log".to_string(), redact);
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match FileSyntax::from_path(path) {
            FileSyntax::Yaml => serde_yaml::to_string(self)?,
            FileSyntax::Toml => toml::to_string_pretty(self)?,
            FileSyntax::Json => serde_json::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
