pub mod color;
pub mod document;
pub mod error;
pub mod result;

pub use color::{colors_match, normalize_color, optional_color_matches};
pub use document::{
    Border, Borders, Callout, CalloutKind, Cell, CellProperties, DEFAULT_LINE_SPACING,
    DEFAULT_MARGIN_DXA, ExtractedDocument, Indent, MAX_TYPOGRAPHY_SAMPLES, Margins, Paragraph,
    ParagraphProperties, Row, Run, RunProperties, Spacing, StyleDefaults, Table, TableProperties,
    Typography, TypographySample, left_border,
};
pub use error::{ErrorKind, Severity, ValidationError};
pub use result::{AuditResults, Category, CategoryTally, ValidationResult, Verdict};

#[cfg(test)]
mod tests {
    use super::*;

    fn result(rule_id: &str, category: Category, verdict: Verdict) -> ValidationResult {
        ValidationResult {
            rule_id: rule_id.to_string(),
            category,
            description: String::new(),
            actual: String::new(),
            expected: String::new(),
            verdict,
            spec_ref: None,
        }
    }

    #[test]
    fn audit_results_tally_by_category() {
        let fail = ValidationError::new(ErrorKind::Color, "HDR-R2-BG", "row 2");
        let warn = ValidationError::new(ErrorKind::Color, "HDR-DIFF", "same fill")
            .with_severity(Severity::Warning);
        let results = AuditResults::from_results(vec![
            result("HDR-R1-BG", Category::HeaderTable, Verdict::Pass),
            result("HDR-R2-BG", Category::HeaderTable, Verdict::Fail(fail)),
            result("HDR-DIFF", Category::HeaderTable, Verdict::from_error(warn)),
            result("LAY-MARGIN-TOP", Category::Layout, Verdict::Pass),
        ]);
        assert_eq!(results.passed().len(), 2);
        assert_eq!(results.failed().len(), 1);
        assert_eq!(results.warnings().len(), 1);
        assert!(results.has_failures());
        let header = results.categories[&Category::HeaderTable];
        assert_eq!(
            header,
            CategoryTally {
                passed: 1,
                failed: 1,
                warnings: 1
            }
        );
    }

    #[test]
    fn verdict_serializes_with_status_tag() {
        let json = serde_json::to_value(Verdict::Pass).expect("serialize verdict");
        assert_eq!(json["status"], "pass");
    }
}
