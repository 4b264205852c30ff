//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use serde::Serialize;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Path => handle_config_path(output),
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
    }
}

/// Handle config show subcommand
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let content = match args.format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    output.writeln(content.trim_end())
}

#[derive(Debug, Serialize)]
struct SearchPath {
    path: String,
    exists: bool,
}

/// Handle config path subcommand
fn handle_config_path(output: &mut OutputWriter) -> Result<()> {
    let paths: Vec<SearchPath> = Config::default_config_paths()
        .into_iter()
        .map(|path| SearchPath {
            exists: path.exists(),
            path: path.display().to_string(),
        })
        .collect();

    if output.format() == crate::cli::OutputFormat::Human {
        output.section("Configuration Search Path")?;
        let rows = paths
            .iter()
            .map(|p| {
                let marker = if p.exists { "✓" } else { "✗" };
                vec![marker.to_string(), p.path.clone()]
            })
            .collect();
        output.table(&["", "Path"], rows)
    } else {
        output.data(&paths)
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => Config::user_config_path()
            .ok_or_else(|| Error::config("Unable to determine user config directory"))?,
    };

    if path.exists() && !args.force {
        return Err(Error::config(format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    Config::sample()?.save(&path)?;
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Edit it to add your own named transformations.")?;
    Ok(())
}
