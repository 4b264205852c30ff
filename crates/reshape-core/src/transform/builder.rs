//! Builder for object transformation specs
//!
//! Object keys must write exactly one destination key. The builder checks
//! this when the spec is built instead of when it is first evaluated.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::types::TransformSpec;
use crate::error::{Error, Result};

/// Builder for creating object specs entry by entry
#[derive(Debug, Clone, Default)]
pub struct ObjectSpecBuilder {
    entries: Vec<(TransformSpec, TransformSpec)>,
}

impl ObjectSpecBuilder {
    /// Create a new, empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `(source, destination)` entry
    pub fn entry(mut self, key: impl Into<TransformSpec>, value: impl Into<TransformSpec>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Build the object spec
    pub fn build(self) -> Result<TransformSpec> {
        if let Some((key, _)) = self
            .entries
            .iter()
            .find(|(key, _)| key.destination_key().is_none())
        {
            return Err(Error::malformed(
                key,
                format!("a {} cannot be an object key", key.kind()),
            ));
        }

        Ok(TransformSpec::Object(self.entries))
    }
}

impl TransformSpec {
    /// Start building an object spec
    pub fn object() -> ObjectSpecBuilder {
        ObjectSpecBuilder::new()
    }
}
