//! Dotted path resolution against nested mappings
//!
//! A path such as `"a.b.c"` is split on `.` and walked strictly left to
//! right. Every segment must land on a mapping; the first absent key is a
//! missing-field signal, which nullable mode turns into `null`.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result, Shape};
use crate::ResultMap;
use serde_json::Value;

/// Segment separator for field paths
pub const SEPARATOR: char = '.';

/// Walk `path` through `input`.
///
/// Returns [`Lookup::Missing`] when a segment is absent, leaving the nullable decision
/// to the caller. A non-mapping cursor fails with [`Error::TypeMismatch`]
/// naming the segment being looked up.
pub fn lookup<'a>(path: &str, input: &'a Value) -> Result<Lookup<'a>> {
    let mut cursor = input;
    for segment in path.split(SEPARATOR) {
        let map = cursor
            .as_object()
            .ok_or_else(|| Error::type_mismatch(segment, cursor, Shape::Mapping))?;
        match map.get(segment) {
            Some(next) => cursor = next,
            None => {
                return Ok(Lookup::Missing {
                    segment: segment.to_string(),
                    container: cursor,
                })
            }
        }
    }
    Ok(Lookup::Found(cursor))
}

/// Outcome of walking a path
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<'a> {
    /// Every segment resolved
    Found(&'a Value),
    /// `segment` was absent from `container`
    Missing { segment: String, container: &'a Value },
}

impl<'a> Lookup<'a> {
    /// Convert to the resolved value, or the missing-field error
    pub fn required(self) -> Result<&'a Value> {
        match self {
            Lookup::Found(value) => Ok(value),
            Lookup::Missing { segment, container } => Err(Error::field_missing(segment, container)),
        }
    }
}

/// Resolve `path` against `input`, keyed by the full original path.
///
/// `"a.b.c"` produces the key `"a.b.c"`, never just `"c"`.
pub fn resolve(path: &str, input: &Value, nullable: bool) -> Result<ResultMap> {
    let value = match lookup(path, input)? {
        Lookup::Found(value) => value.clone(),
        Lookup::Missing { segment, container } => {
            if !nullable {
                let err = Error::field_missing(segment, container);
                tracing::debug!(path, error = %err, "path resolution failed");
                return Err(err);
            }
            tracing::trace!(path, segment = %segment, "missing field resolved to null");
            Value::Null
        }
    };

    let mut result = ResultMap::new();
    result.insert(path.to_string(), value);
    Ok(result)
}

/// Resolve a path that must land on a string, as the string built-ins need
pub fn resolve_str<'a>(path: &str, input: &'a Value) -> Result<&'a str> {
    let value = lookup(path, input)?.required()?;
    value
        .as_str()
        .ok_or_else(|| Error::type_mismatch(path, value, Shape::String))
}
