//! Core types for the transformation system
//!
//! This module defines the closed [`TransformSpec`] sum type and the
//! [`Extractor`] capability that custom steps implement.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::{Result, ResultMap};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A pluggable step that consumes a record and produces a result map.
///
/// The evaluator hands the current input to [`Extractor::apply`] untouched and
/// returns whatever it produces; path and nullable handling are the
/// extractor's own business.
pub trait Extractor: fmt::Debug + Send + Sync {
    /// Produce the output entries for `input`
    fn apply(&self, input: &Value) -> Result<ResultMap>;

    /// Short name, used as the `$name` directive when rendering
    fn name(&self) -> &str;

    /// The single key this extractor writes, when it writes exactly one.
    ///
    /// Required for an extractor to appear as the key of an object spec.
    fn destination_key(&self) -> Option<&str> {
        None
    }

    /// Arguments rendered into the `{"$name": args}` document form
    fn arguments(&self) -> Value {
        Value::Null
    }
}

/// Declarative description of what to extract from a record
#[derive(Debug, Clone)]
pub enum TransformSpec {
    /// A dotted or plain field path such as `"a.b.c"`
    Field(String),
    /// Ordered `(source, destination)` pairs: resolve the key against the
    /// input, then apply the value spec to that sub-result
    Object(Vec<(TransformSpec, TransformSpec)>),
    /// Specs applied independently to the same input, results unioned
    List(Vec<TransformSpec>),
    /// An opaque extractor invoked directly with the input
    Extractor(Arc<dyn Extractor>),
}

/// Counts of each shape inside a spec tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SpecStats {
    pub fields: usize,
    pub objects: usize,
    pub lists: usize,
    pub extractors: usize,
    /// Nesting depth, a bare field being depth 1
    pub depth: usize,
}

impl TransformSpec {
    /// Create a field spec
    pub fn field(path: impl Into<String>) -> Self {
        TransformSpec::Field(path.into())
    }

    /// Create a list spec
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TransformSpec>,
    {
        TransformSpec::List(items.into_iter().map(Into::into).collect())
    }

    /// Wrap an extractor
    pub fn extractor(extractor: impl Extractor + 'static) -> Self {
        TransformSpec::Extractor(Arc::new(extractor))
    }

    /// Name of the variant, for logging and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            TransformSpec::Field(_) => "field",
            TransformSpec::Object(_) => "object",
            TransformSpec::List(_) => "list",
            TransformSpec::Extractor(_) => "extractor",
        }
    }

    /// The key this spec writes when used as an object key.
    ///
    /// Fields write their full path; extractors report their own key;
    /// composite specs have none.
    pub fn destination_key(&self) -> Option<&str> {
        match self {
            TransformSpec::Field(path) => Some(path),
            TransformSpec::Extractor(extractor) => extractor.destination_key(),
            TransformSpec::Object(_) | TransformSpec::List(_) => None,
        }
    }

    /// Render the spec in its document form.
    ///
    /// Fields become strings, lists arrays, objects mappings and extractors
    /// `{"$name": args}` directives.
    pub fn to_document(&self) -> Value {
        match self {
            TransformSpec::Field(path) => Value::String(path.clone()),
            TransformSpec::List(items) => Value::Array(items.iter().map(Self::to_document).collect()),
            TransformSpec::Object(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = match key {
                        TransformSpec::Field(path) => path.clone(),
                        other => other.to_string(),
                    };
                    map.insert(key, value.to_document());
                }
                Value::Object(map)
            }
            TransformSpec::Extractor(extractor) => {
                let mut map = Map::with_capacity(1);
                map.insert(format!("${}", extractor.name()), extractor.arguments());
                Value::Object(map)
            }
        }
    }

    /// Shape counts for the whole tree
    pub fn stats(&self) -> SpecStats {
        let mut stats = SpecStats::default();
        self.collect_stats(&mut stats, 1);
        stats
    }

    fn collect_stats(&self, stats: &mut SpecStats, depth: usize) {
        stats.depth = stats.depth.max(depth);
        match self {
            TransformSpec::Field(_) => stats.fields += 1,
            TransformSpec::Extractor(_) => stats.extractors += 1,
            TransformSpec::List(items) => {
                stats.lists += 1;
                for item in items {
                    item.collect_stats(stats, depth + 1);
                }
            }
            TransformSpec::Object(entries) => {
                stats.objects += 1;
                for (key, value) in entries {
                    key.collect_stats(stats, depth + 1);
                    value.collect_stats(stats, depth + 1);
                }
            }
        }
    }
}

impl PartialEq for TransformSpec {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Field(a), Self::Field(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Extractor(a), Self::Extractor(b)) => {
                // Extractors are opaque; compare by what they render to
                a.name() == b.name() && a.arguments() == b.arguments()
            }
            _ => false,
        }
    }
}

impl fmt::Display for TransformSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_document())
    }
}

impl Serialize for TransformSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

impl From<&str> for TransformSpec {
    fn from(path: &str) -> Self {
        TransformSpec::Field(path.to_string())
    }
}

impl From<String> for TransformSpec {
    fn from(path: String) -> Self {
        TransformSpec::Field(path)
    }
}

impl<T: Into<TransformSpec>> From<Vec<T>> for TransformSpec {
    fn from(items: Vec<T>) -> Self {
        TransformSpec::list(items)
    }
}
