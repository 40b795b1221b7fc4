use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use tfcu_model::{AuditResults, ValidationResult};

use crate::common::{
    REPORT_TITLE, location, suggested_fix, write_classed_element, write_text_element,
};
use crate::{ReportOptions, ReportSummary};

const STYLE: &str = "body { font-family: Calibri, Arial, sans-serif; margin: 2rem; color: #222; }
h1 { color: #154747; }
table { border-collapse: collapse; margin-bottom: 1.5rem; }
th, td { border: 1px solid #ccc; padding: 4px 10px; text-align: left; }
th { background: #154747; color: #fff; }
.fail { border-left: 4px solid #C00000; padding-left: 0.75rem; }
.warning { color: #7f6000; }
.pass { color: #548235; }
code { background: #f4f4f4; padding: 0 3px; }";

type HtmlWriter = Writer<Vec<u8>>;

pub(crate) fn render(
    results: &AuditResults,
    summary: &ReportSummary,
    options: &ReportOptions,
) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::DocType(BytesText::from_escaped("html")))?;
    let mut html = BytesStart::new("html");
    html.push_attribute(("lang", "en"));
    writer.write_event(Event::Start(html))?;

    writer.write_event(Event::Start(BytesStart::new("head")))?;
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("charset", "utf-8"));
    writer.write_event(Event::Empty(meta))?;
    write_text_element(&mut writer, "title", REPORT_TITLE)?;
    write_text_element(&mut writer, "style", STYLE)?;
    writer.write_event(Event::End(BytesEnd::new("head")))?;

    writer.write_event(Event::Start(BytesStart::new("body")))?;
    write_text_element(&mut writer, "h1", REPORT_TITLE)?;
    write_metadata(&mut writer, options)?;
    write_summary(&mut writer, summary)?;
    write_categories(&mut writer, results)?;
    write_failures(&mut writer, &results.failed())?;
    write_warnings(&mut writer, &results.warnings())?;
    if options.verbose {
        write_passed(&mut writer, &results.passed())?;
    }
    writer.write_event(Event::End(BytesEnd::new("body")))?;
    writer.write_event(Event::End(BytesEnd::new("html")))?;

    String::from_utf8(writer.into_inner()).context("HTML report is not valid UTF-8")
}

fn write_metadata(writer: &mut HtmlWriter, options: &ReportOptions) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("dl")))?;
    let mut rows = vec![
        ("Document", options.document_path.clone()),
        ("Spec version", options.spec_version.clone()),
        ("Generated", options.generated_at_text()),
    ];
    if let Some(digest) = &options.document_sha256 {
        rows.push(("SHA-256", digest.clone()));
    }
    for (term, value) in rows {
        write_text_element(writer, "dt", term)?;
        write_text_element(writer, "dd", &value)?;
    }
    writer.write_event(Event::End(BytesEnd::new("dl")))?;
    Ok(())
}

fn write_row<'a>(
    writer: &mut HtmlWriter,
    cell: &str,
    values: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("tr")))?;
    for value in values {
        write_text_element(writer, cell, value)?;
    }
    writer.write_event(Event::End(BytesEnd::new("tr")))?;
    Ok(())
}

fn write_summary(writer: &mut HtmlWriter, summary: &ReportSummary) -> Result<()> {
    write_text_element(writer, "h2", "Summary")?;
    writer.write_event(Event::Start(BytesStart::new("table")))?;
    write_row(writer, "th", ["Metric", "Value"])?;
    let rows = [
        ("Total checks", summary.total.to_string()),
        ("Passed", summary.passed.to_string()),
        ("Failed", summary.failed.to_string()),
        ("Warnings", summary.warnings.to_string()),
        (
            "Compliance",
            format!("{:.1}%", summary.compliance_percentage),
        ),
    ];
    for (metric, value) in &rows {
        write_row(writer, "td", [*metric, value.as_str()])?;
    }
    writer.write_event(Event::End(BytesEnd::new("table")))?;
    Ok(())
}

fn write_categories(writer: &mut HtmlWriter, results: &AuditResults) -> Result<()> {
    write_text_element(writer, "h2", "Categories")?;
    writer.write_event(Event::Start(BytesStart::new("table")))?;
    write_row(writer, "th", ["Category", "Passed", "Failed", "Warnings"])?;
    for (category, tally) in &results.categories {
        let counts = [tally.passed, tally.failed, tally.warnings].map(|count| count.to_string());
        write_row(
            writer,
            "td",
            [
                category.label(),
                counts[0].as_str(),
                counts[1].as_str(),
                counts[2].as_str(),
            ],
        )?;
    }
    writer.write_event(Event::End(BytesEnd::new("table")))?;
    Ok(())
}

fn write_failures(writer: &mut HtmlWriter, failed: &[&ValidationResult]) -> Result<()> {
    write_text_element(writer, "h2", "Failures")?;
    if failed.is_empty() {
        return write_text_element(writer, "p", "No failures.");
    }
    writer.write_event(Event::Start(BytesStart::new("ol")))?;
    for result in failed {
        let mut item = BytesStart::new("li");
        item.push_attribute(("class", "fail"));
        writer.write_event(Event::Start(item))?;
        write_text_element(
            writer,
            "h3",
            &format!("{}: {}", result.rule_id, result.description),
        )?;
        writer.write_event(Event::Start(BytesStart::new("dl")))?;
        let mut fields = Vec::new();
        if let Some(error) = result.error() {
            fields.push(("Type", error.type_name().to_string()));
        }
        fields.push(("Location", location(result).to_string()));
        fields.push(("Actual", result.actual.clone()));
        fields.push(("Expected", result.expected.clone()));
        if let Some(error) = result.error() {
            fields.push(("Message", error.message.clone()));
        }
        fields.push(("Suggested fix", suggested_fix(result)));
        for (term, value) in fields {
            write_text_element(writer, "dt", term)?;
            write_text_element(writer, "dd", &value)?;
        }
        writer.write_event(Event::End(BytesEnd::new("dl")))?;
        writer.write_event(Event::End(BytesEnd::new("li")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("ol")))?;
    Ok(())
}

fn write_warnings(writer: &mut HtmlWriter, warnings: &[&ValidationResult]) -> Result<()> {
    write_text_element(writer, "h2", "Warnings")?;
    if warnings.is_empty() {
        return write_text_element(writer, "p", "No warnings.");
    }
    writer.write_event(Event::Start(BytesStart::new("ul")))?;
    for result in warnings {
        let message = result
            .error()
            .map_or(result.description.as_str(), |error| error.message.as_str());
        write_classed_element(
            writer,
            "li",
            "warning",
            &format!("{} at {}: {message}", result.rule_id, location(result)),
        )?;
    }
    writer.write_event(Event::End(BytesEnd::new("ul")))?;
    Ok(())
}

fn write_passed(writer: &mut HtmlWriter, passed: &[&ValidationResult]) -> Result<()> {
    write_text_element(writer, "h2", "Passed Checks")?;
    writer.write_event(Event::Start(BytesStart::new("ul")))?;
    for result in passed {
        write_classed_element(
            writer,
            "li",
            "pass",
            &format!("{}: {} ({})", result.rule_id, result.description, result.actual),
        )?;
    }
    writer.write_event(Event::End(BytesEnd::new("ul")))?;
    Ok(())
}
