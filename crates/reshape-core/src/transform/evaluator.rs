//! Recursive evaluation of a transformation spec against a record
//!
//! Dispatch happens once per node on the spec variant. Composite shapes merge
//! their children's results into a fresh accumulator, later entries
//! overwriting earlier ones with the same key. Errors propagate unchanged and
//! abort the whole evaluation.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::types::TransformSpec;
use crate::error::{Error, Result, Shape};
use crate::path;
use crate::ResultMap;
use serde_json::Value;

/// Evaluate `spec` against `input`.
///
/// `nullable` controls whether a missing field yields `null` or fails with
/// [`Error::FieldMissing`]. It is threaded unchanged through every recursive
/// call; only a [`nullable`](super::built_in::nullable) extractor overrides it.
pub fn transform(spec: &TransformSpec, input: &Value, nullable: bool) -> Result<ResultMap> {
    tracing::trace!(kind = spec.kind(), nullable, "evaluating transformation");

    match spec {
        TransformSpec::Field(field) => path::resolve(field, input, nullable),
        TransformSpec::Object(entries) => transform_object(spec, entries, input, nullable),
        TransformSpec::List(items) => transform_list(spec, items, input, nullable),
        TransformSpec::Extractor(extractor) => extractor.apply(input),
    }
}

fn transform_object(
    spec: &TransformSpec,
    entries: &[(TransformSpec, TransformSpec)],
    input: &Value,
    nullable: bool,
) -> Result<ResultMap> {
    require_mapping(spec, input)?;

    let mut accumulator = ResultMap::new();
    for (key, value) in entries {
        let destination = key.destination_key().ok_or_else(|| {
            Error::malformed(key, "object keys must write a single destination key")
        })?;

        let mut intermediate = transform(key, input, nullable)?;
        let source = intermediate.remove(destination).ok_or_else(|| {
            Error::malformed(key, format!("key produced no '{}' entry", destination))
        })?;

        accumulator.extend(transform(value, &source, nullable)?);
    }

    Ok(accumulator)
}

fn transform_list(
    spec: &TransformSpec,
    items: &[TransformSpec],
    input: &Value,
    nullable: bool,
) -> Result<ResultMap> {
    // Checked even when every item is an extractor that would accept a scalar
    require_mapping(spec, input)?;

    let mut accumulator = ResultMap::new();
    for item in items {
        accumulator.extend(transform(item, input, nullable)?);
    }

    Ok(accumulator)
}

fn require_mapping(spec: &TransformSpec, input: &Value) -> Result<()> {
    if input.is_object() {
        Ok(())
    } else {
        let err = Error::type_mismatch(spec.to_string(), input, Shape::Mapping);
        tracing::debug!(error = %err, "composite transformation applied to non-mapping");
        Err(err)
    }
}
