//! Reading records and spec documents from disk or stdin

use crate::cli::InputFormat;
use crate::config::FileSyntax;
use crate::error::{Error, Result};
use reshape_core::TransformSpec;
use serde_json::Value;
use std::io::{self, Read};
use std::path::Path;

/// Read all of `path`, or stdin when the path is absent or `-`
pub fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            if !path.exists() {
                return Err(Error::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            Ok(std::fs::read_to_string(path)?)
        }
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Pick the record format: explicit flag, then file extension, then fallback
pub fn detect_format(
    explicit: Option<InputFormat>,
    path: Option<&Path>,
    fallback: InputFormat,
) -> InputFormat {
    if let Some(format) = explicit {
        return format;
    }
    match path.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        Some("ndjson") | Some("jsonl") => InputFormat::Ndjson,
        Some("json") => InputFormat::Json,
        _ => fallback,
    }
}

/// Split input text into records.
///
/// NDJSON yields one record per non-blank line. JSON yields a single record,
/// or the elements of a top-level array when `each` is set.
pub fn parse_records(content: &str, format: InputFormat, each: bool) -> Result<Vec<Value>> {
    match format {
        InputFormat::Ndjson => content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| Error::InvalidInput {
                    line: i + 1,
                    message: e.to_string(),
                })
            })
            .collect(),
        InputFormat::Json => {
            let value: Value = serde_json::from_str(content).map_err(|e| Error::InvalidInput {
                line: e.line(),
                message: e.to_string(),
            })?;
            match value {
                Value::Array(items) if each => Ok(items),
                other => Ok(vec![other]),
            }
        }
    }
}

/// Load a transformation spec document, picking the syntax by extension.
///
/// TOML has no top-level arrays, so a TOML file may hold its spec under a
/// `spec` key; the same wrapper is accepted in every syntax.
pub fn load_spec(path: &Path) -> Result<TransformSpec> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;

    let document: Value = match FileSyntax::from_path(path) {
        FileSyntax::Yaml => serde_yaml::from_str(&content)?,
        FileSyntax::Toml => toml::from_str(&content)?,
        FileSyntax::Json => serde_json::from_str(&content)?,
    };

    let document = match document {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("spec") => {
            map.remove("spec").unwrap_or(Value::Null)
        }
        other => other,
    };

    tracing::debug!(path = %path.display(), "Loaded spec document");
    Ok(TransformSpec::from_value(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_detect_format() {
        let fallback = InputFormat::Json;
        assert_eq!(
            detect_format(None, Some(Path::new("a.jsonl")), fallback),
            InputFormat::Ndjson
        );
        assert_eq!(
            detect_format(None, Some(Path::new("a.ndjson")), fallback),
            InputFormat::Ndjson
        );
        assert_eq!(
            detect_format(None, Some(Path::new("a.json")), InputFormat::Ndjson),
            InputFormat::Json
        );
        assert_eq!(detect_format(None, None, InputFormat::Ndjson), InputFormat::Ndjson);
        assert_eq!(
            detect_format(Some(InputFormat::Json), Some(Path::new("a.ndjson")), fallback),
            InputFormat::Json
        );
    }

    #[test]
    fn test_parse_ndjson_skips_blank_lines() {
        let records = parse_records("{\"a\":1}\n\n  \n{\"a\":2}\n", InputFormat::Ndjson, false).unwrap();
        assert_eq!(records, vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn test_parse_ndjson_reports_line() {
        let err = parse_records("{\"a\":1}\n{oops\n", InputFormat::Ndjson, false).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { line: 2, .. }));
    }

    #[test]
    fn test_parse_json_each() {
        let content = r#"[{"a": 1}, {"a": 2}, 3]"#;
        assert_eq!(parse_records(content, InputFormat::Json, true).unwrap().len(), 3);
        assert_eq!(parse_records(content, InputFormat::Json, false).unwrap().len(), 1);
        assert_eq!(
            parse_records(r#"{"a": 1}"#, InputFormat::Json, true).unwrap(),
            vec![json!({"a": 1})]
        );
    }

    #[test]
    fn test_load_spec_yaml() {
        let file = write_temp(
            ".yaml",
            "- id\n- user: [name]\n- $rename: {from: meta.author, to: author}\n",
        );
        let spec = load_spec(file.path()).unwrap();
        assert_eq!(
            spec.to_document(),
            json!(["id", {"user": ["name"]}, {"$rename": {"from": "meta.author", "to": "author"}}])
        );
    }

    #[test]
    fn test_load_spec_toml_wrapper() {
        let file = write_temp(".toml", "spec = [\"id\", \"user.name\"]\n");
        let spec = load_spec(file.path()).unwrap();
        assert_eq!(spec, TransformSpec::list(["id", "user.name"]));
    }

    #[test]
    fn test_load_spec_field_named_spec_in_object() {
        // A multi-key object is an object spec even when one key is `spec`
        let file = write_temp(".json", r#"{"spec": "a", "other": "b"}"#);
        let spec = load_spec(file.path()).unwrap();
        assert_eq!(spec.kind(), "object");
    }

    #[test]
    fn test_load_spec_malformed() {
        let file = write_temp(".json", "[1, 2]");
        let err = load_spec(file.path()).unwrap_err();
        assert!(matches!(err, Error::Core(reshape_core::Error::MalformedSpecification { .. })));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_source(Some(Path::new("/nonexistent/records.json"))).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
