//! Fixture-driven tests for the evaluation engine
//!
//! Every file under `tests/fixtures/` is one case: a spec in document form,
//! an input record, the nullable flag, and either the expected result or the
//! expected error kind.

use pretty_assertions::assert_eq;
use reshape_core::{transform, ErrorKind, TransformSpec};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
struct Fixture {
    description: String,
    spec: Value,
    input: Value,
    #[serde(default)]
    nullable: bool,
    expected: Option<Value>,
    error: Option<ErrorKind>,
}

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn load_fixtures() -> Vec<(PathBuf, Fixture)> {
    let mut fixtures: Vec<(PathBuf, Fixture)> = WalkDir::new(fixtures_dir())
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().and_then(|s| s.to_str()) == Some("json"))
        .map(|entry| {
            let content = std::fs::read_to_string(entry.path()).expect("Failed to read fixture");
            let fixture: Fixture = serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Invalid fixture {}: {}", entry.path().display(), e));
            (entry.into_path(), fixture)
        })
        .collect();
    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    fixtures
}

fn run(fixture: &Fixture) -> Result<Value, reshape_core::Error> {
    let spec = TransformSpec::from_value(&fixture.spec)?;
    let result = transform(&spec, &fixture.input, fixture.nullable)?;
    Ok(Value::Object(result))
}

#[test]
fn fixture_corpus_is_not_empty() {
    assert!(load_fixtures().len() >= 5);
}

#[test]
fn fixture_cases() {
    for (path, fixture) in load_fixtures() {
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        match (&fixture.expected, fixture.error) {
            (Some(expected), None) => {
                let actual = run(&fixture)
                    .unwrap_or_else(|e| panic!("{} ({}): unexpected error: {}", name, fixture.description, e));
                assert_eq!(&actual, expected, "{}: {}", name, fixture.description);
            }
            (None, Some(kind)) => {
                let err = run(&fixture)
                    .expect_err(&format!("{} ({}): expected {}", name, fixture.description, kind));
                assert_eq!(err.kind(), kind, "{}: {}", name, fixture.description);
            }
            _ => panic!("{}: fixture needs exactly one of 'expected' or 'error'", name),
        }
    }
}

#[test]
fn fixture_specs_are_stable_documents() {
    for (path, fixture) in load_fixtures() {
        if let Ok(spec) = TransformSpec::from_value(&fixture.spec) {
            let rendered = spec.to_document();
            let reloaded = TransformSpec::from_value(&rendered).unwrap();
            assert_eq!(reloaded, spec, "{}", path.display());
        }
    }
}
