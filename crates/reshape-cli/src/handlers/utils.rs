//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use crate::input;
use reshape_core::TransformSpec;
use std::path::Path;

/// A spec together with a label saying where it came from
#[derive(Debug, Clone)]
pub struct LoadedSpec {
    pub label: String,
    pub spec: TransformSpec,
}

/// Load the spec named on the command line: a file, or a configured transform
pub fn load_spec(
    path: Option<&Path>,
    transform: Option<&str>,
    config: &Config,
) -> Result<LoadedSpec> {
    match (path, transform) {
        (Some(path), _) => Ok(LoadedSpec {
            label: path.display().to_string(),
            spec: input::load_spec(path)?,
        }),
        (None, Some(name)) => Ok(LoadedSpec {
            label: format!("config:{}", name),
            spec: config.transform(name)?.clone(),
        }),
        (None, None) => Err(Error::other("Either a spec file or --transform NAME is required")),
    }
}
