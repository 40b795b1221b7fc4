//! Structural classification of extracted elements.

use tfcu_model::{CalloutKind, Paragraph, Table};
use tfcu_standards::SPEC_CONFIG;

/// Callout kind of a paragraph, if it is one.
///
/// A callout carries paragraph shading, at least one paragraph border and a
/// fill that belongs to the callout palette. Shaded paragraphs in other
/// colors are ordinary paragraphs.
pub fn classify_callout(paragraph: &Paragraph) -> Option<CalloutKind> {
    let properties = &paragraph.properties;
    if properties.borders.is_empty() {
        return None;
    }
    let fill = properties.shading.as_deref()?;
    SPEC_CONFIG.colors.callout_for_fill(fill)
}

/// The document's header table: the first table, when it has the expected
/// number of rows.
pub fn header_table_candidate(tables: &[Table]) -> Option<&Table> {
    tables
        .first()
        .filter(|table| table.row_count == SPEC_CONFIG.header_table.row_count)
}
