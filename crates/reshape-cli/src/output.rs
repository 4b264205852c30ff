//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with dedicated support
//! for transformed records, apply reports, spec summaries and progress
//! indicators.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging::redaction;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use reshape_core::{ErrorKind, ResultMap, SpecStats};
use serde::Serialize;
use serde_json::Value;
use std::io::{self, IsTerminal, Write};
use tracing::trace;

/// Outcome of running a spec over a batch of records
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    /// Where the spec came from (file path or `config:NAME`)
    pub spec: String,
    /// Records read from the input
    pub records: usize,
    /// Records transformed successfully
    pub succeeded: usize,
    /// Records dropped under the skip policy
    pub skipped: Vec<SkippedRecord>,
    /// Where results were written, when not stdout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub duration_ms: u64,
}

/// A record that failed and was skipped
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRecord {
    pub index: usize,
    pub kind: ErrorKind,
    pub locator: String,
    pub message: String,
}

/// Shape report for a loaded spec
#[derive(Debug, Clone, Serialize)]
pub struct SpecSummary {
    pub spec: String,
    pub kind: String,
    pub stats: SpecStats,
    /// Normalized document, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Value>,
}

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format one transformed record as a self-contained chunk
    fn format_record(&self, record: &ResultMap) -> Result<String>;

    /// Format an apply report
    fn format_apply_report(&self, report: &ApplyReport) -> Result<String>;

    /// Format a spec summary
    fn format_spec_summary(&self, summary: &SpecSummary) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_record(&self, record: &ResultMap) -> Result<String> {
        match self {
            OutputFormat::Yaml => Ok(format!("---\n{}", serde_yaml::to_string(record)?)),
            _ => self.format(record),
        }
    }

    fn format_apply_report(&self, report: &ApplyReport) -> Result<String> {
        match self {
            OutputFormat::Human => format_apply_report_human(report),
            _ => self.format(report),
        }
    }

    fn format_spec_summary(&self, summary: &SpecSummary) -> Result<String> {
        match self {
            OutputFormat::Human => format_spec_summary_human(summary),
            _ => self.format(summary),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress bars with custom writers
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Disable progress indicators (e.g. when the configuration turns them off)
    pub fn set_show_progress(&mut self, show: bool) {
        self.show_progress = self.show_progress && show;
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        trace_redacted(value)?;
        let formatted = self.format.format(value)?;
        self.writeln(&formatted)
    }

    /// Write one transformed record
    pub fn record(&mut self, record: &ResultMap) -> Result<()> {
        trace_redacted(record)?;
        let formatted = self.format.format_record(record)?;
        if self.format == OutputFormat::Yaml {
            // serde_yaml output already ends with a newline
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write an apply report
    pub fn apply_report(&mut self, report: &ApplyReport) -> Result<()> {
        let formatted = self.format.format_apply_report(report)?;
        self.writeln(&formatted)
    }

    /// Write a spec summary
    pub fn spec_summary(&mut self, summary: &SpecSummary) -> Result<()> {
        let formatted = self.format.format_spec_summary(summary)?;
        self.writeln(&formatted)
    }

    /// Create a progress bar for long operations
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        Some(pb)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        let formatted = render_table(headers, &rows);
        let mut lines = formatted.lines();
        if let Some(header) = lines.next() {
            if self.use_color {
                self.writeln(&header.bold().to_string())?;
            } else {
                self.writeln(header)?;
            }
        }
        for line in lines {
            self.writeln(line)?;
        }
        Ok(())
    }
}

/// Log a value at trace level with secrets blanked out
fn trace_redacted<T: Serialize>(value: &T) -> Result<()> {
    if tracing::enabled!(tracing::Level::TRACE) {
        let mut value = serde_json::to_value(value)?;
        redaction::redact_json_value(&mut value);
        trace!(data = %value, "Writing output");
    }
    Ok(())
}

/// Helper function to create a progress bar style
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

/// Lay out rows under headers with padded columns
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let pad = |i: usize, cell: &str| match widths.get(i) {
        Some(width) => format!("{:width$}", cell, width = *width),
        None => cell.to_string(),
    };

    let mut output = String::new();
    let header_row = headers
        .iter()
        .enumerate()
        .map(|(i, h)| pad(i, h))
        .collect::<Vec<_>>()
        .join(" │ ");
    output.push_str(header_row.trim_end());
    output.push('\n');

    let separator = widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─");
    output.push_str(&separator);
    output.push('\n');

    for row in rows {
        let row_str = row
            .iter()
            .enumerate()
            .map(|(i, cell)| pad(i, cell))
            .collect::<Vec<_>>()
            .join(" │ ");
        output.push_str(row_str.trim_end());
        output.push('\n');
    }

    output
}

/// Format an apply report for human reading
fn format_apply_report_human(report: &ApplyReport) -> Result<String> {
    let mut output = String::new();

    output.push_str("═══ Apply Summary ═══\n\n");
    output.push_str(&format!("  Spec: {}\n", report.spec));
    output.push_str(&format!("  Records: {}\n", report.records));
    output.push_str(&format!("  Transformed: {}\n", report.succeeded));
    output.push_str(&format!("  Skipped: {}\n", report.skipped.len()));
    if let Some(path) = &report.output {
        output.push_str(&format!("  Written to: {}\n", path));
    }
    output.push_str(&format!("  Duration: {}ms\n", report.duration_ms));

    if !report.skipped.is_empty() {
        output.push('\n');
        let rows = report
            .skipped
            .iter()
            .map(|s| {
                vec![
                    s.index.to_string(),
                    s.kind.to_string(),
                    s.locator.clone(),
                    s.message.clone(),
                ]
            })
            .collect::<Vec<_>>();
        output.push_str(&render_table(&["Record", "Kind", "At", "Message"], &rows));
    }

    Ok(output)
}

/// Format a spec summary for human reading
fn format_spec_summary_human(summary: &SpecSummary) -> Result<String> {
    let mut output = String::new();

    output.push_str(&format!("✅ {} is a valid {} spec\n\n", summary.spec, summary.kind));
    output.push_str(&format!("  Fields: {}\n", summary.stats.fields));
    output.push_str(&format!("  Objects: {}\n", summary.stats.objects));
    output.push_str(&format!("  Lists: {}\n", summary.stats.lists));
    output.push_str(&format!("  Extractors: {}\n", summary.stats.extractors));
    output.push_str(&format!("  Depth: {}\n", summary.stats.depth));

    if let Some(document) = &summary.document {
        output.push_str("\n📝 Normalized spec:\n");
        output.push_str(&serde_json::to_string_pretty(document)?);
        output.push('\n');
    }

    Ok(output)
}
