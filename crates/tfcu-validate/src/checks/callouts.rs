//! Callout box styling: fill, left border and indent.

use tfcu_model::{
    Callout, CalloutKind, Category, ErrorKind, ExtractedDocument, ValidationError, colors_match,
};
use tfcu_standards::SPEC_CONFIG;

use crate::context::{RuleCheck, ValidationContext};

pub fn check(
    ctx: &mut ValidationContext,
    document: &ExtractedDocument,
) -> Result<(), ValidationError> {
    for (index, callout) in document.callouts.iter().enumerate() {
        let mut ctx = ctx.scope(format!("callout[{index}]"));
        check_callout(&mut ctx, index, callout)?;
    }
    Ok(())
}

fn check_callout(
    ctx: &mut ValidationContext,
    index: usize,
    callout: &Callout,
) -> Result<(), ValidationError> {
    let style = SPEC_CONFIG.colors.callout(callout.kind);
    let borders = &SPEC_CONFIG.borders;
    let kind = callout.kind;

    let fill_ref = match kind {
        CalloutKind::Critical => "C08",
        CalloutKind::Warning => "C09",
        CalloutKind::Info => "C10",
        CalloutKind::Tip => "C11",
    };
    let border_ref = match kind {
        CalloutKind::Critical => "C04",
        CalloutKind::Warning => "C05",
        CalloutKind::Info => "C06",
        CalloutKind::Tip => "C07",
    };

    let check = RuleCheck::new(
        Category::Callouts,
        format!("CAL-{index}-FILL"),
        format!("{kind} callout fill"),
    )
    .values(&callout.fill, style.fill)
    .spec_ref(fill_ref);
    ctx.verdict(
        colors_match(&callout.fill, style.fill),
        check,
        ErrorKind::Callout,
        || format!("{kind} callout fill is {}", callout.fill),
    )?;

    let actual_color = callout.left_border_color.as_deref().unwrap_or("none");
    let check = RuleCheck::new(
        Category::Callouts,
        format!("CAL-{index}-BORDER-COLOR"),
        format!("{kind} callout left border color"),
    )
    .values(actual_color, style.border)
    .spec_ref(border_ref);
    ctx.verdict(
        colors_match(actual_color, style.border),
        check,
        ErrorKind::Color,
        || format!("{kind} callout left border color is {actual_color}"),
    )?;

    let expected_width = borders.callout_left_width;
    let width_ok = callout
        .left_border_width
        .is_some_and(|width| width.abs_diff(expected_width) <= borders.width_tolerance);
    let actual_width = callout
        .left_border_width
        .map_or_else(|| "none".to_string(), |width| width.to_string());
    let check = RuleCheck::new(
        Category::Callouts,
        format!("CAL-{index}-BORDER-WIDTH"),
        format!("{kind} callout left border is {expected_width} eighths of a point"),
    )
    .values(&actual_width, expected_width)
    .spec_ref("B01");
    ctx.verdict(width_ok, check, ErrorKind::Border, || {
        format!(
            "{kind} callout left border width is {actual_width}, expected {expected_width} (±{})",
            borders.width_tolerance
        )
    })?;

    let expected_indent = SPEC_CONFIG.spacing.callout_indent;
    let tolerance = SPEC_CONFIG.layout.tolerance;
    let check = RuleCheck::new(
        Category::Callouts,
        format!("CAL-{index}-INDENT"),
        format!("{kind} callout is indented {expected_indent} DXA"),
    )
    .values(callout.indent_left, expected_indent)
    .spec_ref("S01");
    ctx.verdict(
        callout.indent_left.abs_diff(expected_indent) <= tolerance,
        check,
        ErrorKind::Spacing,
        || {
            format!(
                "{kind} callout indent is {} DXA, expected {expected_indent} (±{tolerance})",
                callout.indent_left
            )
        },
    )
}
