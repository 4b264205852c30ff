//! Apply command handler

use super::utils;
use crate::cli::{ApplyArgs, ErrorPolicy, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::input;
use crate::logging::{redaction, timing::Timer};
use crate::output::{ApplyReport, OutputWriter, SkippedRecord};
use indicatif::ProgressBar;
use reshape_core::{transform, ResultMap, TransformSpec};
use serde_json::Value;
use std::fs::File;
use std::io::BufWriter;

/// Results of running one spec over a batch
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub results: Vec<ResultMap>,
    pub skipped: Vec<SkippedRecord>,
}

/// Handle the apply command
pub fn handle_apply(args: ApplyArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let loaded = utils::load_spec(args.spec.as_deref(), args.transform.as_deref(), config)?;
    let timer = Timer::with_details("apply", &loaded.label);
    let _entered = timer.span().clone().entered();

    let nullable = args.nullable || config.defaults.nullable;
    let policy = args.on_error.unwrap_or(config.defaults.on_error);
    let format = input::detect_format(
        args.format,
        args.input.as_deref(),
        config.defaults.input_format,
    );

    let content = input::read_source(args.input.as_deref())?;
    let records = input::parse_records(&content, format, args.each)?;
    tracing::info!(
        spec = %loaded.label,
        records = records.len(),
        nullable,
        policy = ?policy,
        "Applying transformation"
    );

    let progress = if records.len() > 1 {
        output.progress_bar(records.len() as u64, "records")
    } else {
        None
    };
    let outcome = apply_records(&loaded.spec, &records, nullable, policy, progress.as_ref())?;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let mut report = ApplyReport {
        spec: loaded.label,
        records: records.len(),
        succeeded: outcome.results.len(),
        skipped: outcome.skipped,
        output: None,
        duration_ms: 0,
    };

    match &args.save_to {
        Some(path) => {
            // Human output is for terminals; files get pretty JSON instead
            let file_format = match output.format() {
                OutputFormat::Human => OutputFormat::JsonPretty,
                other => other,
            };
            let file = File::create(path)?;
            let mut sink =
                OutputWriter::with_writer(file_format, false, true, Box::new(BufWriter::new(file)));
            for result in &outcome.results {
                sink.record(result)?;
            }
            report.output = Some(path.display().to_string());
            report.duration_ms = timer.elapsed().as_millis() as u64;
            output.apply_report(&report)?;
        }
        None => {
            for result in &outcome.results {
                output.record(result)?;
            }
            report.duration_ms = timer.elapsed().as_millis() as u64;
            if output.format() == OutputFormat::Human {
                output.section("Apply Summary")?;
                output.apply_report(&report)?;
            }
        }
    }

    if !report.skipped.is_empty() {
        tracing::warn!(
            skipped = report.skipped.len(),
            records = report.records,
            "Some records were skipped"
        );
    }

    Ok(())
}

/// Run `spec` over every record under the given batch policy.
///
/// Under [`ErrorPolicy::Abort`] the first failure is returned tagged with its
/// record index; under [`ErrorPolicy::Skip`] failures are collected and the
/// batch continues.
pub fn apply_records(
    spec: &TransformSpec,
    records: &[Value],
    nullable: bool,
    policy: ErrorPolicy,
    progress: Option<&ProgressBar>,
) -> Result<BatchOutcome> {
    let mut outcome = BatchOutcome::default();

    for (index, record) in records.iter().enumerate() {
        match transform(spec, record, nullable) {
            Ok(result) => outcome.results.push(result),
            Err(source) => {
                log_failed_record(index, record, &source);
                match policy {
                    ErrorPolicy::Abort => return Err(Error::Record { index, source }),
                    ErrorPolicy::Skip => outcome.skipped.push(SkippedRecord {
                        index,
                        kind: source.kind(),
                        locator: source.locator().to_string(),
                        message: source.to_string(),
                    }),
                }
            }
        }
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    Ok(outcome)
}

fn log_failed_record(index: usize, record: &Value, error: &reshape_core::Error) {
    tracing::warn!(
        index,
        kind = %error.kind(),
        locator = error.locator(),
        "Record failed to transform"
    );
    if tracing::enabled!(tracing::Level::DEBUG) {
        let mut record = record.clone();
        redaction::redact_json_value(&mut record);
        tracing::debug!(index, record = %record, "Failed record");
    }
}
