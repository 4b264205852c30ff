//! Error types for the Reshape core library
//!
//! Every failure raised while loading or evaluating a transformation belongs to
//! one closed taxonomy: a malformed specification, a type mismatch, or a
//! missing field. Errors unwind the whole evaluation; there is no partial
//! result on the error path.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Main error type for Reshape operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The specification is none of {mapping, sequence, path-string, extractor},
    /// or one of its directives is unusable
    #[error("Malformed specification: {reason} (in {spec})")]
    MalformedSpecification {
        /// Rendering of the offending spec fragment
        spec: String,
        reason: String,
    },

    /// A value had the wrong shape for the operation applied to it
    #[error("Type mismatch at '{locator}': expected {expected}, found {}", describe(.actual))]
    TypeMismatch {
        /// Path segment or spec fragment where the mismatch occurred
        locator: String,
        actual: Value,
        expected: Shape,
    },

    /// A required key was absent and nullable mode was not in effect
    #[error("Field missing: '{locator}' not found in {}", describe(.container))]
    FieldMissing {
        /// The first path segment that did not resolve
        locator: String,
        container: Value,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Value shapes an operation can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// A key/value mapping (JSON object)
    Mapping,
    /// A string scalar
    String,
}

/// Stable discriminant for callers that branch on the failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    MalformedSpecification,
    TypeMismatch,
    FieldMissing,
}

impl Error {
    /// Create a malformed specification error
    pub fn malformed(spec: impl fmt::Display, reason: impl Into<String>) -> Self {
        Error::MalformedSpecification {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(locator: impl Into<String>, actual: &Value, expected: Shape) -> Self {
        Error::TypeMismatch {
            locator: locator.into(),
            actual: actual.clone(),
            expected,
        }
    }

    /// Create a missing field error
    pub fn field_missing(locator: impl Into<String>, container: &Value) -> Self {
        Error::FieldMissing {
            locator: locator.into(),
            container: container.clone(),
        }
    }

    /// The failure category
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedSpecification { .. } => ErrorKind::MalformedSpecification,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::FieldMissing { .. } => ErrorKind::FieldMissing,
        }
    }

    /// Where the failure occurred: a path segment or a rendered spec fragment
    pub fn locator(&self) -> &str {
        match self {
            Error::MalformedSpecification { spec, .. } => spec,
            Error::TypeMismatch { locator, .. } => locator,
            Error::FieldMissing { locator, .. } => locator,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Mapping => write!(f, "mapping"),
            Shape::String => write!(f, "string"),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MalformedSpecification => write!(f, "MalformedSpecification"),
            ErrorKind::TypeMismatch => write!(f, "TypeMismatch"),
            ErrorKind::FieldMissing => write!(f, "FieldMissing"),
        }
    }
}

/// Short human description of a value for error messages
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) if s.len() <= 32 => format!("string \"{}\"", s),
        Value::String(s) => format!("string of {} bytes", s.len()),
        Value::Array(items) => format!("sequence of {} item(s)", items.len()),
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().take(5).map(String::as_str).collect();
            if map.len() > keys.len() {
                format!("mapping with keys [{}, ...]", keys.join(", "))
            } else {
                format!("mapping with keys [{}]", keys.join(", "))
            }
        }
    }
}
