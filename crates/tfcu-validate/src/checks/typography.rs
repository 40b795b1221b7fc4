//! Fonts and font sizes observed across every run.

use tfcu_model::{Category, ErrorKind, ExtractedDocument, ValidationError};
use tfcu_standards::SPEC_CONFIG;

use crate::context::{RuleCheck, ValidationContext};

pub fn check(
    ctx: &mut ValidationContext,
    document: &ExtractedDocument,
) -> Result<(), ValidationError> {
    let fonts = &SPEC_CONFIG.fonts;
    let sizes = &SPEC_CONFIG.font_sizes;
    let typography = &document.typography;
    let permitted = fonts.permitted().join(", ");

    for font in &typography.fonts {
        let check = RuleCheck::new(
            Category::Typography,
            format!("TYP-FONT-{font}"),
            format!("Font {font} is permitted"),
        )
        .values(font, &permitted)
        .spec_ref(if font.eq_ignore_ascii_case(fonts.monospace) {
            "T02"
        } else {
            "T01"
        });
        ctx.verdict(fonts.is_permitted(font), check, ErrorKind::Font, || {
            format!("Font {font} is not permitted; use {permitted}")
        })?;
    }

    let known = sizes
        .known
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    for &size in &typography.sizes {
        let check = RuleCheck::new(
            Category::Typography,
            format!("TYP-SIZE-{size}"),
            format!("Font size {size} half-points is a standard size"),
        )
        .values(size, &known)
        .spec_ref(size_ref(size));
        if sizes.is_known(size) {
            ctx.pass(check);
        } else {
            ctx.warn(
                check,
                ErrorKind::Size,
                format!("Font size {size} half-points is not one of the standard sizes"),
            );
        }
    }

    tracing::debug!(
        fonts = typography.fonts.len(),
        sizes = typography.sizes.len(),
        samples = typography.samples.len(),
        "typography checked"
    );
    Ok(())
}

fn size_ref(size: u32) -> &'static str {
    let sizes = &SPEC_CONFIG.font_sizes;
    if size == sizes.title {
        "T04"
    } else if size == sizes.heading {
        "T05"
    } else if size == sizes.table {
        "T06"
    } else {
        "T03"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ValidationMode;
    use tfcu_model::Typography;

    #[test]
    fn one_verdict_per_distinct_font_and_size() {
        let document = ExtractedDocument {
            typography: Typography {
                fonts: ["Calibri", "Arial", "consolas"]
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                sizes: [22, 23].into_iter().collect(),
                ..Typography::default()
            },
            ..ExtractedDocument::default()
        };
        let mut ctx = ValidationContext::new(ValidationMode::ReportOnly);
        check(&mut ctx, &document).unwrap();
        let results = ctx.finish();

        let failed = results.failed();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].rule_id, "TYP-FONT-Arial");

        let warnings = results.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].rule_id, "TYP-SIZE-23");
        assert_eq!(results.passed().len(), 3);
    }
}
