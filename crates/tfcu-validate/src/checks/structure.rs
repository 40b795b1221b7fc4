//! Required sections, header fields and footer.
//!
//! Every verdict here is advisory: missing structure is reported as a
//! warning and never fails an audit on its own.

use tfcu_model::{Category, ErrorKind, ExtractedDocument, ValidationError};
use tfcu_standards::SPEC_CONFIG;

use crate::context::{RuleCheck, ValidationContext};

pub fn check(
    ctx: &mut ValidationContext,
    document: &ExtractedDocument,
) -> Result<(), ValidationError> {
    let rules = &SPEC_CONFIG.structure;
    let content = document.body_text().collect::<Vec<_>>().join("\n");

    for (section, spec_ref) in rules.required_sections.iter().zip(["ST03", "ST04", "ST05"]) {
        let check = RuleCheck::new(
            Category::Structure,
            format!("STR-SECTION-{}", rule_suffix(section)),
            format!("{section} section is present"),
        )
        .spec_ref(spec_ref);
        if content.contains(section) {
            ctx.pass(check.values("present", "present"));
        } else {
            ctx.warn(
                check.values("missing", "present"),
                ErrorKind::Structure,
                format!("Missing required section: {section}"),
            );
        }
    }

    for (field, spec_ref) in rules.required_fields.iter().zip(["ST06", "ST07"]) {
        let check = RuleCheck::new(
            Category::Structure,
            format!("STR-FIELD-{}", rule_suffix(field.name)),
            format!("{} field is present", field.name),
        )
        .spec_ref(spec_ref);
        if field.markers.iter().any(|marker| content.contains(marker)) {
            ctx.pass(check.values("present", "present"));
        } else {
            ctx.warn(
                check.values("missing", field.markers.join(" or ")),
                ErrorKind::Structure,
                format!("Missing '{}' field", field.name),
            );
        }
    }

    if rules.footer_required {
        let check = RuleCheck::new(Category::Structure, "STR-FOOTER", "Primary footer is present")
            .spec_ref("ST09");
        if document.footer.is_some() {
            ctx.pass(check.values("present", "present"));
        } else {
            ctx.warn(
                check.values("missing", "word/footer1.xml"),
                ErrorKind::Structure,
                "Document has no primary footer",
            );
        }
    }
    Ok(())
}

/// `Revision History` becomes `REVISION-HISTORY`.
fn rule_suffix(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("-")
}
