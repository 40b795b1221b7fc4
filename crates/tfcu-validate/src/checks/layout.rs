//! Page margins.

use tfcu_model::{Category, ErrorKind, ExtractedDocument, ValidationError};
use tfcu_standards::SPEC_CONFIG;

use crate::context::{RuleCheck, ValidationContext};

pub fn check(
    ctx: &mut ValidationContext,
    document: &ExtractedDocument,
) -> Result<(), ValidationError> {
    let rules = &SPEC_CONFIG.layout;

    let Some(margins) = document.margins else {
        let check = RuleCheck::new(Category::Layout, "LAY-MARGINS", "Page margins are defined")
            .values("no section properties", "w:sectPr/w:pgMar")
            .spec_ref("L01");
        return ctx.fail(
            check,
            ErrorKind::Structure,
            "Document body has no section properties; page margins cannot be checked",
        );
    };

    let sides = [
        ("TOP", "Top", margins.top, rules.margins.top, "L01"),
        ("BOTTOM", "Bottom", margins.bottom, rules.margins.bottom, "L02"),
        ("LEFT", "Left", margins.left, rules.margins.left, "L03"),
        ("RIGHT", "Right", margins.right, rules.margins.right, "L04"),
    ];
    for (id, label, actual, expected, spec_ref) in sides {
        let check = RuleCheck::new(
            Category::Layout,
            format!("LAY-MARGIN-{id}"),
            format!("{label} margin is {expected} DXA"),
        )
        .values(actual, expected)
        .spec_ref(spec_ref);
        let within = actual.abs_diff(expected) <= rules.tolerance;
        ctx.verdict(within, check, ErrorKind::Spacing, || {
            format!(
                "{label} margin is {actual} DXA, expected {expected} DXA (±{})",
                rules.tolerance
            )
        })?;
    }
    Ok(())
}
