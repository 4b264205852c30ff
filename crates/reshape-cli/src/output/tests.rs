// Tests for output formatting
//
// These tests cover record chunking per format, the human renderings of
// apply reports and spec summaries, and the writer's quiet/format gating.

use super::*;
use serde_json::json;
use super::test_support::writer_for;

fn sample_record() -> ResultMap {
    match json!({"id": 7, "user.name": "ada", "tags": ["a", "b"]}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn sample_report() -> ApplyReport {
    ApplyReport {
        spec: "specs/users.yaml".to_string(),
        records: 3,
        succeeded: 2,
        skipped: vec![SkippedRecord {
            index: 1,
            kind: ErrorKind::FieldMissing,
            locator: "user".to_string(),
            message: "Field missing: 'user' not found in mapping with keys [id]".to_string(),
        }],
        output: None,
        duration_ms: 5,
    }
}

#[test]
fn test_json_records_are_one_line_each() {
    let (mut writer, buffer) = writer_for(OutputFormat::Json, false);
    writer.record(&sample_record()).unwrap();
    writer.record(&sample_record()).unwrap();

    let contents = buffer.contents();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], r#"{"id":7,"user.name":"ada","tags":["a","b"]}"#);
}

#[test]
fn test_yaml_records_are_separate_documents() {
    let (mut writer, buffer) = writer_for(OutputFormat::Yaml, false);
    writer.record(&sample_record()).unwrap();
    writer.record(&sample_record()).unwrap();

    let contents = buffer.contents();
    assert_eq!(contents.matches("---\n").count(), 2);
    assert!(contents.contains("user.name: ada"));
}

#[test]
fn test_record_keeps_key_order() {
    let formatted = OutputFormat::JsonPretty.format_record(&sample_record()).unwrap();
    let id = formatted.find("\"id\"").unwrap();
    let name = formatted.find("\"user.name\"").unwrap();
    let tags = formatted.find("\"tags\"").unwrap();
    assert!(id < name && name < tags);
}

#[test]
fn test_apply_report_formatting_human() {
    let formatted = format_apply_report_human(&sample_report()).unwrap();
    assert!(formatted.contains("═══ Apply Summary ═══"));
    assert!(formatted.contains("Spec: specs/users.yaml"));
    assert!(formatted.contains("Records: 3"));
    assert!(formatted.contains("Transformed: 2"));
    assert!(formatted.contains("Skipped: 1"));
    assert!(formatted.contains("FieldMissing"));
    assert!(!formatted.contains("Written to"));
}

#[test]
fn test_apply_report_formatting_json() {
    let formatted = OutputFormat::Json.format_apply_report(&sample_report()).unwrap();
    let value: Value = serde_json::from_str(&formatted).unwrap();
    assert_eq!(value["succeeded"], 2);
    assert_eq!(value["skipped"][0]["kind"], "FieldMissing");
    assert_eq!(value["skipped"][0]["locator"], "user");
    assert!(value.get("output").is_none());
}

#[test]
fn test_spec_summary_formatting_human() {
    let summary = SpecSummary {
        spec: "audit.json".to_string(),
        kind: "list".to_string(),
        stats: SpecStats {
            fields: 3,
            objects: 1,
            lists: 1,
            extractors: 2,
            depth: 3,
        },
        document: Some(json!(["a", {"b": "c"}])),
    };

    let formatted = format_spec_summary_human(&summary).unwrap();
    assert!(formatted.contains("audit.json is a valid list spec"));
    assert!(formatted.contains("Extractors: 2"));
    assert!(formatted.contains("Depth: 3"));
    assert!(formatted.contains("📝 Normalized spec:"));
}

#[test]
fn test_render_table() {
    let table = render_table(
        &["Record", "Kind"],
        &[vec!["12".to_string(), "TypeMismatch".to_string()]],
    );
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], "Record │ Kind");
    assert_eq!(lines[1], "───────┼─────────────");
    assert_eq!(lines[2], "12     │ TypeMismatch");
}

#[test]
fn test_messages_only_in_human_format() {
    let (mut writer, buffer) = writer_for(OutputFormat::Json, false);
    writer.info("hello").unwrap();
    writer.success("done").unwrap();
    writer.section("Title").unwrap();
    assert_eq!(buffer.contents(), "");

    let (mut writer, buffer) = writer_for(OutputFormat::Human, false);
    writer.info("hello").unwrap();
    writer.warning("careful").unwrap();
    assert_eq!(buffer.contents(), "INFO: hello\nWARNING: careful\n");
}

#[test]
fn test_quiet_suppresses_info() {
    let (mut writer, buffer) = writer_for(OutputFormat::Human, true);
    writer.info("hello").unwrap();
    writer.success("done").unwrap();
    writer.table(&["a"], vec![vec!["1".to_string()]]).unwrap();
    assert_eq!(buffer.contents(), "");
}

#[test]
fn test_custom_writer_has_no_progress() {
    let (writer, _) = writer_for(OutputFormat::Human, false);
    assert_eq!(writer.format(), OutputFormat::Human);
    assert!(writer.progress_bar(10, "records").is_none());
}
