//! Audit report generation.
//!
//! Three renderings of the same [`AuditResults`]: JSON for machines,
//! Markdown for review threads and a standalone HTML page.

pub mod common;
mod html;
mod json;
mod markdown;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tfcu_model::AuditResults;

pub use common::compliance_percentage;

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    Json,
    #[default]
    Markdown,
    Html,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "md",
            ReportFormat::Html => "html",
        }
    }
}

/// Rendering options and report provenance.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub format: ReportFormat,
    pub document_path: String,
    pub spec_version: String,
    /// Include passed checks in Markdown and HTML output.
    pub verbose: bool,
    /// Hex SHA-256 of the audited file.
    pub document_sha256: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl ReportOptions {
    pub fn new(
        format: ReportFormat,
        document_path: impl Into<String>,
        spec_version: impl Into<String>,
    ) -> Self {
        Self {
            format,
            document_path: document_path.into(),
            spec_version: spec_version.into(),
            verbose: false,
            document_sha256: None,
            generated_at: Utc::now(),
        }
    }

    pub(crate) fn generated_at_text(&self) -> String {
        self.generated_at
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }
}

/// Headline numbers of an audit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub compliance_percentage: f64,
}

impl ReportSummary {
    pub fn from_results(results: &AuditResults) -> Self {
        let passed = results.passed().len();
        let failed = results.failed().len();
        Self {
            total: results.results.len(),
            passed,
            failed,
            warnings: results.warnings().len(),
            compliance_percentage: compliance_percentage(passed, failed),
        }
    }
}

/// A rendered report.
#[derive(Debug, Clone)]
pub struct Report {
    pub format: ReportFormat,
    pub summary: ReportSummary,
    pub content: String,
}

impl Report {
    /// Write the rendered content to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.content)
            .with_context(|| format!("write report {}", path.display()))
    }
}

/// Render `results` in the requested format.
pub fn generate_report(results: &AuditResults, options: &ReportOptions) -> Result<Report> {
    let summary = ReportSummary::from_results(results);
    let content = match options.format {
        ReportFormat::Json => json::render(results, &summary, options)?,
        ReportFormat::Markdown => markdown::render(results, &summary, options),
        ReportFormat::Html => html::render(results, &summary, options)?,
    };
    tracing::debug!(
        format = options.format.extension(),
        bytes = content.len(),
        "rendered report"
    );
    Ok(Report {
        format: options.format,
        summary,
        content,
    })
}
