//! Built-in extractors for common operations
//!
//! Each built-in is a thin application of the evaluator and the path
//! resolver: rename a field, split a string field, mask a string field with a
//! regular expression, or force the nullable flag for a sub-spec.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::evaluator::transform;
use super::types::{Extractor, TransformSpec};
use crate::error::{Error, Result};
use crate::path;
use crate::ResultMap;
use regex::Regex;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

/// Resolve `from` and re-key the value under `to`
#[derive(Debug, Clone, PartialEq)]
pub struct Rename {
    from: String,
    to: String,
}

impl Rename {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl Extractor for Rename {
    fn apply(&self, input: &Value) -> Result<ResultMap> {
        let value = path::lookup(&self.from, input)?.required()?;
        let mut result = ResultMap::new();
        result.insert(self.to.clone(), value.clone());
        Ok(result)
    }

    fn name(&self) -> &str {
        "rename"
    }

    fn destination_key(&self) -> Option<&str> {
        Some(&self.to)
    }

    fn arguments(&self) -> Value {
        json!({"from": self.from, "to": self.to})
    }
}

/// Split a string field on a literal delimiter
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    field: String,
    delimiter: String,
}

impl Split {
    /// An empty delimiter is a malformed specification
    pub fn new(field: impl Into<String>, delimiter: impl Into<String>) -> Result<Self> {
        let field = field.into();
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(Error::malformed(
                json!({"$split": {"field": field, "delimiter": delimiter}}),
                "empty delimiter",
            ));
        }

        Ok(Self { field, delimiter })
    }
}

impl Extractor for Split {
    fn apply(&self, input: &Value) -> Result<ResultMap> {
        let text = path::resolve_str(&self.field, input)?;
        let parts = text
            .split(self.delimiter.as_str())
            .map(|part| Value::String(part.to_string()))
            .collect();

        let mut result = ResultMap::new();
        result.insert(self.field.clone(), Value::Array(parts));
        Ok(result)
    }

    fn name(&self) -> &str {
        "split"
    }

    fn destination_key(&self) -> Option<&str> {
        Some(&self.field)
    }

    fn arguments(&self) -> Value {
        json!({"field": self.field, "delimiter": self.delimiter})
    }
}

/// Replace every match of a pattern in a string field.
///
/// The replacement is a backslash template: `\1` or `\g<1>` inserts a
/// numbered group, `\g<name>` a named one, and `\\` a literal backslash.
/// Every other character, `$` included, is copied as is.
#[derive(Debug, Clone)]
pub struct Mask {
    field: String,
    pattern: Regex,
    replacement: String,
    // `replacement` rewritten into `regex` expansion syntax
    expansion: String,
}

impl Mask {
    /// Compile `pattern`; an invalid pattern is a malformed specification
    pub fn new(
        field: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self> {
        let field = field.into();
        let replacement = replacement.into();
        let malformed = |reason: String| {
            Error::malformed(
                json!({"$mask": {"field": field, "pattern": pattern, "replacement": replacement}}),
                reason,
            )
        };

        let compiled =
            Regex::new(pattern).map_err(|e| malformed(format!("invalid pattern: {}", e)))?;
        let expansion = expansion_template(&compiled, &replacement)
            .map_err(|reason| malformed(format!("invalid replacement: {}", reason)))?;

        Ok(Self {
            field,
            pattern: compiled,
            replacement,
            expansion,
        })
    }

    /// Apply the substitution to a string
    pub fn mask_str(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.expansion.as_str())
            .into_owned()
    }
}

/// Rewrite a backslash template into `regex` expansion syntax.
///
/// Group references become `${N}` / `${name}` so adjacent text never runs
/// into the group name, and a literal `$` becomes `$$`. References to groups
/// the pattern does not define are rejected.
fn expansion_template(pattern: &Regex, template: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(template.len() + 8);
    let mut chars = template.chars().peekable();

    let check_group = |group: &str| -> std::result::Result<(), String> {
        let known = match group.parse::<usize>() {
            Ok(index) => index < pattern.captures_len(),
            Err(_) => pattern.capture_names().flatten().any(|name| name == group),
        };
        if known {
            Ok(())
        } else {
            Err(format!("unknown group '{}'", group))
        }
    };

    while let Some(c) = chars.next() {
        match c {
            '$' => out.push_str("$$"),
            '\\' => match chars.next() {
                None => return Err("trailing backslash".to_string()),
                Some('\\') => out.push('\\'),
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('g') => {
                    if chars.next() != Some('<') {
                        return Err("expected '<' after \\g".to_string());
                    }
                    let mut group = String::new();
                    loop {
                        match chars.next() {
                            Some('>') => break,
                            Some(ch) => group.push(ch),
                            None => return Err("unterminated \\g<...>".to_string()),
                        }
                    }
                    if group.is_empty() {
                        return Err("empty group name".to_string());
                    }
                    check_group(&group)?;
                    out.push_str(&format!("${{{}}}", group));
                }
                Some(d @ '1'..='9') => {
                    let mut group = d.to_string();
                    if let Some(&next) = chars.peek() {
                        if next.is_ascii_digit() {
                            group.push(next);
                            chars.next();
                        }
                    }
                    check_group(&group)?;
                    out.push_str(&format!("${{{}}}", group));
                }
                Some(other) if other.is_ascii_alphanumeric() => {
                    return Err(format!("bad escape \\{}", other));
                }
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
            },
            _ => out.push(c),
        }
    }

    Ok(out)
}

impl Extractor for Mask {
    fn apply(&self, input: &Value) -> Result<ResultMap> {
        let text = path::resolve_str(&self.field, input)?;
        let mut result = ResultMap::new();
        result.insert(self.field.clone(), Value::String(self.mask_str(text)));
        Ok(result)
    }

    fn name(&self) -> &str {
        "mask"
    }

    fn destination_key(&self) -> Option<&str> {
        Some(&self.field)
    }

    fn arguments(&self) -> Value {
        json!({
            "field": self.field,
            "pattern": self.pattern.as_str(),
            "replacement": self.replacement,
        })
    }
}

/// Evaluate a sub-spec with the nullable flag forced, ignoring the ambient one
#[derive(Debug, Clone, PartialEq)]
pub struct Nullable {
    field: TransformSpec,
    nullable: bool,
}

impl Nullable {
    pub fn new(field: impl Into<TransformSpec>, nullable: bool) -> Self {
        Self {
            field: field.into(),
            nullable,
        }
    }
}

impl Extractor for Nullable {
    fn apply(&self, input: &Value) -> Result<ResultMap> {
        transform(&self.field, input, self.nullable)
    }

    fn name(&self) -> &str {
        "nullable"
    }

    fn destination_key(&self) -> Option<&str> {
        self.field.destination_key()
    }

    fn arguments(&self) -> Value {
        json!({"field": self.field.to_document(), "nullable": self.nullable})
    }
}

type ExtractorFn = dyn Fn(&Value) -> Result<ResultMap> + Send + Sync;

/// Adapter turning a closure into an [`Extractor`]
#[derive(Clone)]
pub struct FnExtractor {
    name: String,
    destination: Option<String>,
    function: Arc<ExtractorFn>,
}

impl FnExtractor {
    /// Declare the single key the closure writes, so it can key an object spec
    pub fn with_destination(mut self, key: impl Into<String>) -> Self {
        self.destination = Some(key.into());
        self
    }
}

impl fmt::Debug for FnExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnExtractor")
            .field("name", &self.name)
            .field("destination", &self.destination)
            .finish_non_exhaustive()
    }
}

impl Extractor for FnExtractor {
    fn apply(&self, input: &Value) -> Result<ResultMap> {
        (self.function)(input)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn destination_key(&self) -> Option<&str> {
        self.destination.as_deref()
    }
}

/// Create a rename extractor
pub fn rename(from: impl Into<String>, to: impl Into<String>) -> TransformSpec {
    TransformSpec::extractor(Rename::new(from, to))
}

/// Create a split extractor, failing if `delimiter` is empty
pub fn split(field: impl Into<String>, delimiter: impl Into<String>) -> Result<TransformSpec> {
    Ok(TransformSpec::extractor(Split::new(field, delimiter)?))
}

/// Create a mask extractor, failing if `pattern` does not compile
pub fn mask(
    field: impl Into<String>,
    pattern: &str,
    replacement: impl Into<String>,
) -> Result<TransformSpec> {
    Ok(TransformSpec::extractor(Mask::new(field, pattern, replacement)?))
}

/// Create a nullable override for `field`
pub fn nullable(field: impl Into<TransformSpec>, nullable: bool) -> TransformSpec {
    TransformSpec::extractor(Nullable::new(field, nullable))
}

/// Wrap a closure as an extractor
pub fn from_fn<F>(name: impl Into<String>, function: F) -> FnExtractor
where
    F: Fn(&Value) -> Result<ResultMap> + Send + Sync + 'static,
{
    FnExtractor {
        name: name.into(),
        destination: None,
        function: Arc::new(function),
    }
}
