//! Report rendering

use std::io::Write;

use serde::Serialize;

use crate::{
    audit::AuditReport,
    error::{
        AuditError,
        AuditResult,
    },
};

/// Output formats for an audit report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `Missing count: N` followed by one `source -> candidate` line per entry
    #[default]
    Human,
    /// A single JSON object for tooling
    Json,
}

#[derive(Serialize)]
struct JsonEntry {
    source:    String,
    candidate: String,
}

#[derive(Serialize)]
struct JsonReport {
    source_root:   String,
    target_root:   String,
    missing_count: usize,
    missing:       Vec<JsonEntry>,
    scanned:       usize,
}

impl From<&AuditReport> for JsonReport {
    fn from(report: &AuditReport) -> Self {
        Self {
            source_root:   report.source_root.to_string_lossy().into_owned(),
            target_root:   report.target_root.to_string_lossy().into_owned(),
            missing_count: report.missing_count(),
            missing:       report
                .missing
                .iter()
                .map(|entry| JsonEntry {
                    source:    entry.source.to_string_lossy().into_owned(),
                    candidate: entry.candidate.to_string_lossy().into_owned(),
                })
                .collect(),
            scanned:       report.scanned,
        }
    }
}

/// Render a report as text in the requested format
pub fn render(report: &AuditReport, format: OutputFormat) -> AuditResult<String> {
    match format {
        OutputFormat::Human => {
            let mut out = format!("Missing count: {}\n", report.missing_count());
            for entry in &report.missing {
                out.push_str(&format!(
                    "{} -> {}\n",
                    entry.source.display(),
                    entry.candidate.display()
                ));
            }
            Ok(out)
        },
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(&JsonReport::from(report))
                .map_err(|e| AuditError::Render(e.to_string()))?;
            out.push('\n');
            Ok(out)
        },
    }
}

/// Render a report and write it to `writer`
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &AuditReport,
    format: OutputFormat,
) -> AuditResult<()> {
    let text = render(report, format)?;
    writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| AuditError::Render(e.to_string()))
}
