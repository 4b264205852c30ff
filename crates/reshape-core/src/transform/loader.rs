//! Loading transformation specs from their document form
//!
//! Configuration files describe specs as plain data: strings are field
//! paths, arrays are list specs, mappings are object specs, and a mapping
//! with a single `$`-prefixed key is an extractor directive:
//!
//! ```json
//! [
//!   "id",
//!   {"user": ["name", "email"]},
//!   {"$rename": {"from": "meta.created", "to": "created_at"}},
//!   {"$split": {"field": "tags", "delimiter": ","}},
//!   {"$mask": {"field": "card", "pattern": "\\d{12}(\\d{4})", "replacement": "************\\1"}},
//!   {"$nullable": {"field": "nickname", "nullable": true}}
//! ]
//! ```
//!
//! Anything else is rejected here with [`Error::MalformedSpecification`], so
//! a loaded spec is always well formed.

use super::built_in::{Mask, Nullable, Rename, Split};
use super::types::TransformSpec;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Prefix marking an extractor directive key
pub const DIRECTIVE_PREFIX: char = '$';

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RenameArgs {
    from: String,
    to: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SplitArgs {
    field: String,
    delimiter: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MaskArgs {
    field: String,
    pattern: String,
    replacement: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NullableArgs {
    field: Value,
    #[serde(default = "default_nullable")]
    nullable: bool,
}

fn default_nullable() -> bool {
    true
}

impl TransformSpec {
    /// Build a spec from its document form
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(path) => Ok(TransformSpec::Field(path.clone())),
            Value::Array(items) => items
                .iter()
                .map(Self::from_value)
                .collect::<Result<Vec<_>>>()
                .map(TransformSpec::List),
            Value::Object(map) => match directive(map) {
                Some((name, args)) => parse_directive(value, name, args),
                None => {
                    let mut entries = Vec::with_capacity(map.len());
                    for (key, spec) in map {
                        entries.push((TransformSpec::Field(key.clone()), Self::from_value(spec)?));
                    }
                    Ok(TransformSpec::Object(entries))
                }
            },
            Value::Null => Err(Error::malformed(value, "null is not a transformation")),
            Value::Bool(_) => Err(Error::malformed(value, "a boolean is not a transformation")),
            Value::Number(_) => Err(Error::malformed(
                value,
                "a number is not a transformation (sequence indexing is unsupported)",
            )),
        }
    }
}

/// A single-key mapping whose key starts with `$`
fn directive(map: &Map<String, Value>) -> Option<(&str, &Value)> {
    if map.len() != 1 {
        return None;
    }
    let (key, args) = map.iter().next()?;
    key.strip_prefix(DIRECTIVE_PREFIX).map(|name| (name, args))
}

fn parse_directive(document: &Value, name: &str, args: &Value) -> Result<TransformSpec> {
    tracing::trace!(directive = name, "parsing extractor directive");

    match name {
        "rename" => {
            let args: RenameArgs = arguments(document, args)?;
            Ok(TransformSpec::extractor(Rename::new(args.from, args.to)))
        }
        "split" => {
            let args: SplitArgs = arguments(document, args)?;
            Ok(TransformSpec::extractor(Split::new(args.field, args.delimiter)?))
        }
        "mask" => {
            let args: MaskArgs = arguments(document, args)?;
            let mask = Mask::new(args.field, &args.pattern, args.replacement)?;
            Ok(TransformSpec::extractor(mask))
        }
        "nullable" => {
            let args: NullableArgs = arguments(document, args)?;
            let field = TransformSpec::from_value(&args.field)?;
            Ok(TransformSpec::extractor(Nullable::new(field, args.nullable)))
        }
        other => Err(Error::malformed(
            document,
            format!("unknown directive '${}'", other),
        )),
    }
}

fn arguments<T: DeserializeOwned>(document: &Value, args: &Value) -> Result<T> {
    T::deserialize(args).map_err(|e| Error::malformed(document, format!("invalid arguments: {}", e)))
}

impl<'de> Deserialize<'de> for TransformSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        TransformSpec::from_value(&value).map_err(serde::de::Error::custom)
    }
}
