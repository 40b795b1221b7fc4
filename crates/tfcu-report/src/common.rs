//! Helpers shared by the renderers.

use std::io::Write;

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use tfcu_model::ValidationResult;

pub const REPORT_TITLE: &str = "TFCU Procedure Audit Report";

/// `passed / (passed + failed) * 100`, rounded to one decimal.
///
/// Warnings do not count. An audit with no pass/fail verdicts is 100%.
pub fn compliance_percentage(passed: usize, failed: usize) -> f64 {
    let scored = passed + failed;
    if scored == 0 {
        return 100.0;
    }
    let ratio = passed as f64 / scored as f64 * 100.0;
    (ratio * 10.0).round() / 10.0
}

/// Suggested fix for a failed or warned check, falling back to the message.
pub fn suggested_fix(result: &ValidationResult) -> String {
    match result.error() {
        Some(error) => error
            .suggestion
            .clone()
            .unwrap_or_else(|| error.message.clone()),
        None => String::new(),
    }
}

/// Location of a result, or `document` for top-level rules.
pub fn location(result: &ValidationResult) -> &str {
    match result.error() {
        Some(error) if !error.location.is_empty() => &error.location,
        _ => "document",
    }
}

/// Write a simple text element.
pub fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write a text element carrying a `class` attribute.
pub fn write_classed_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    class: &str,
    text: &str,
) -> Result<()> {
    let mut start = BytesStart::new(name);
    start.push_attribute(("class", class));
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
