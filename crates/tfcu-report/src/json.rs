use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;
use tfcu_model::{AuditResults, Category, CategoryTally, Severity, ValidationResult};

use crate::{ReportOptions, ReportSummary};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    metadata: Metadata<'a>,
    summary: &'a ReportSummary,
    categories: &'a BTreeMap<Category, CategoryTally>,
    passed: Vec<JsonCheck<'a>>,
    failed: Vec<JsonCheck<'a>>,
    warnings: Vec<JsonCheck<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata<'a> {
    document: &'a str,
    spec_version: &'a str,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    document_sha256: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonCheck<'a> {
    rule_id: &'a str,
    category: Category,
    description: &'a str,
    actual: &'a str,
    expected: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    spec_ref: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonError<'a> {
    #[serde(rename = "type")]
    error_type: &'static str,
    message: &'a str,
    severity: Severity,
    location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<&'a str>,
}

impl<'a> From<&'a ValidationResult> for JsonCheck<'a> {
    fn from(result: &'a ValidationResult) -> Self {
        Self {
            rule_id: &result.rule_id,
            category: result.category,
            description: &result.description,
            actual: &result.actual,
            expected: &result.expected,
            spec_ref: result.spec_ref.as_deref(),
            error: result.error().map(|error| JsonError {
                error_type: error.type_name(),
                message: &error.message,
                severity: error.severity,
                location: &error.location,
                suggestion: error.suggestion.as_deref(),
            }),
        }
    }
}

pub(crate) fn render(
    results: &AuditResults,
    summary: &ReportSummary,
    options: &ReportOptions,
) -> Result<String> {
    let report = JsonReport {
        metadata: Metadata {
            document: &options.document_path,
            spec_version: &options.spec_version,
            generated_at: options.generated_at_text(),
            document_sha256: options.document_sha256.as_deref(),
        },
        summary,
        categories: &results.categories,
        passed: checks(results.passed()),
        failed: checks(results.failed()),
        warnings: checks(results.warnings()),
    };
    serde_json::to_string_pretty(&report).context("serialize JSON report")
}

fn checks(selected: Vec<&ValidationResult>) -> Vec<JsonCheck<'_>> {
    selected.into_iter().map(JsonCheck::from).collect()
}
