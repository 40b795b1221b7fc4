use tfcu_model::AuditResults;

use crate::common::{REPORT_TITLE, location, suggested_fix};
use crate::{ReportOptions, ReportSummary};

pub(crate) fn render(
    results: &AuditResults,
    summary: &ReportSummary,
    options: &ReportOptions,
) -> String {
    let mut lines = vec![format!("# {REPORT_TITLE}"), String::new()];

    lines.push(format!("- **Document:** `{}`", options.document_path));
    lines.push(format!("- **Spec version:** {}", options.spec_version));
    lines.push(format!("- **Generated:** {}", options.generated_at_text()));
    if let Some(digest) = &options.document_sha256 {
        lines.push(format!("- **SHA-256:** `{digest}`"));
    }
    lines.push(String::new());

    lines.extend(summary_section(summary));
    lines.push(String::new());

    lines.push("## Categories".to_string());
    lines.push(String::new());
    lines.push("| Category | Passed | Failed | Warnings |".to_string());
    lines.push("| --- | --- | --- | --- |".to_string());
    for (category, tally) in &results.categories {
        lines.push(format!(
            "| {} | {} | {} | {} |",
            category.label(),
            tally.passed,
            tally.failed,
            tally.warnings
        ));
    }
    lines.push(String::new());

    lines.push("## Failures".to_string());
    lines.push(String::new());
    let failed = results.failed();
    if failed.is_empty() {
        lines.push("No failures.".to_string());
        lines.push(String::new());
    }
    for (number, result) in failed.iter().enumerate() {
        lines.push(format!(
            "### {}. {}: {}",
            number + 1,
            result.rule_id,
            result.description
        ));
        lines.push(String::new());
        if let Some(error) = result.error() {
            lines.push(format!("- **Type:** {}", error.type_name()));
        }
        lines.push(format!("- **Location:** `{}`", location(result)));
        lines.push(format!("- **Actual:** `{}`", result.actual));
        lines.push(format!("- **Expected:** `{}`", result.expected));
        if let Some(error) = result.error() {
            lines.push(format!("- **Message:** {}", error.message));
        }
        lines.push(format!("- **Suggested fix:** {}", suggested_fix(result)));
        lines.push(String::new());
    }

    lines.push("## Warnings".to_string());
    lines.push(String::new());
    let warnings = results.warnings();
    if warnings.is_empty() {
        lines.push("No warnings.".to_string());
    }
    for result in &warnings {
        let message = result
            .error()
            .map_or(result.description.as_str(), |error| error.message.as_str());
        lines.push(format!(
            "- **{}** at `{}`: {message}",
            result.rule_id,
            location(result)
        ));
    }

    if options.verbose {
        lines.push(String::new());
        lines.push("## Passed Checks".to_string());
        lines.push(String::new());
        for result in results.passed() {
            lines.push(format!(
                "- **{}**: {} (`{}`)",
                result.rule_id, result.description, result.actual
            ));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn summary_section(summary: &ReportSummary) -> Vec<String> {
    vec![
        "## Summary".to_string(),
        String::new(),
        "| Metric | Value |".to_string(),
        "| --- | --- |".to_string(),
        format!("| Total checks | {} |", summary.total),
        format!("| Passed | {} |", summary.passed),
        format!("| Failed | {} |", summary.failed),
        format!("| Warnings | {} |", summary.warnings),
        format!("| Compliance | {:.1}% |", summary.compliance_percentage),
    ]
}
