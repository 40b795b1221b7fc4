//! Two-row header table: title row and metadata row.

use tfcu_model::{
    Category, ErrorKind, ExtractedDocument, Row, ValidationError, optional_color_matches,
};
use tfcu_standards::SPEC_CONFIG;

use crate::context::{RuleCheck, ValidationContext};

pub fn check(
    ctx: &mut ValidationContext,
    document: &ExtractedDocument,
) -> Result<(), ValidationError> {
    let rules = &SPEC_CONFIG.header_table;

    let Some(table) = &document.header_table else {
        let first_rows = document
            .tables
            .first()
            .map_or_else(|| "no tables".to_string(), |table| format!("{} rows", table.row_count));
        let check = RuleCheck::new(
            Category::HeaderTable,
            "HDR-PRESENT",
            "Document opens with a two-row header table",
        )
        .values(first_rows, format!("{} rows", rules.row_count))
        .spec_ref("ST02");
        return ctx.fail(
            check,
            ErrorKind::Structure,
            "Header table not found: the first table must have exactly two rows",
        );
    };
    let (Some(row1), Some(row2)) = (table.rows.first(), table.rows.get(1)) else {
        return Ok(());
    };
    let default_size = document.style_defaults.as_ref().and_then(|defaults| defaults.size);

    let mut ctx = ctx.scope(format!("table[{}]", table.index));
    {
        let mut ctx = ctx.scope("row[0]");
        check_title_row(&mut ctx, row1, default_size)?;
    }
    {
        let mut ctx = ctx.scope("row[1]");
        let actual = row2.shading().unwrap_or("none");
        let check = RuleCheck::new(
            Category::HeaderTable,
            "HDR-R2-BG",
            "Header row 2 background is light teal",
        )
        .values(actual, rules.row2.background)
        .spec_ref("H05");
        let matches = optional_color_matches(row2.shading(), rules.row2.background);
        ctx.verdict(matches, check, ErrorKind::Color, || {
            if optional_color_matches(row2.shading(), rules.row1.background) {
                "Header row 2 uses the dark brand teal; it must use the light teal".to_string()
            } else {
                format!("Header row 2 background is {actual}")
            }
        })?;
    }

    let check = RuleCheck::new(
        Category::HeaderTable,
        "HDR-DIFF",
        "Header rows use different backgrounds",
    )
    .values(
        format!(
            "{} / {}",
            row1.shading().unwrap_or("none"),
            row2.shading().unwrap_or("none")
        ),
        "distinct fills",
    )
    .spec_ref("H06");
    if rules.rows_differentiated && row1.shading() == row2.shading() {
        ctx.warn(
            check,
            ErrorKind::Color,
            "Header rows 1 and 2 share the same background",
        );
    } else {
        ctx.pass(check);
    }
    Ok(())
}

fn check_title_row(
    ctx: &mut ValidationContext,
    row: &Row,
    default_size: Option<u32>,
) -> Result<(), ValidationError> {
    let rules = &SPEC_CONFIG.header_table.row1;

    let actual = row.shading().unwrap_or("none");
    let check = RuleCheck::new(
        Category::HeaderTable,
        "HDR-R1-BG",
        "Header row 1 background is brand teal",
    )
    .values(actual, rules.background)
    .spec_ref("H01");
    ctx.verdict(
        optional_color_matches(row.shading(), rules.background),
        check,
        ErrorKind::Color,
        || format!("Header row 1 background is {actual}"),
    )?;

    let runs: Vec<_> = row.text_runs().collect();

    let off_color = runs
        .iter()
        .find(|run| !optional_color_matches(run.properties.color.as_deref(), rules.text_color));
    let actual = match (runs.is_empty(), off_color) {
        (true, _) => "no text".to_string(),
        (false, Some(run)) => run.properties.color.clone().unwrap_or_else(|| "auto".to_string()),
        (false, None) => rules.text_color.to_string(),
    };
    let check = RuleCheck::new(
        Category::HeaderTable,
        "HDR-R1-TEXT",
        "Header row 1 text is white",
    )
    .values(&actual, rules.text_color)
    .spec_ref("H02");
    ctx.verdict(
        !runs.is_empty() && off_color.is_none(),
        check,
        ErrorKind::Color,
        || format!("Header row 1 text color is {actual}"),
    )?;

    let off_size = runs
        .iter()
        .map(|run| run.properties.size.or(default_size))
        .find(|size| *size != Some(rules.font_size));
    let actual = match (runs.is_empty(), off_size) {
        (true, _) => "no text".to_string(),
        (false, Some(Some(size))) => size.to_string(),
        (false, Some(None)) => "unset".to_string(),
        (false, None) => rules.font_size.to_string(),
    };
    let check = RuleCheck::new(
        Category::HeaderTable,
        "HDR-R1-SIZE",
        "Header row 1 text is 16pt",
    )
    .values(&actual, rules.font_size)
    .spec_ref("H03");
    ctx.verdict(
        !runs.is_empty() && off_size.is_none(),
        check,
        ErrorKind::Size,
        || format!("Header row 1 font size is {actual} half-points"),
    )?;

    let all_bold = !runs.is_empty() && runs.iter().all(|run| run.properties.bold == rules.bold);
    let check = RuleCheck::new(
        Category::HeaderTable,
        "HDR-R1-BOLD",
        "Header row 1 text is bold",
    )
    .values(if all_bold { "bold" } else { "not bold" }, "bold")
    .spec_ref("H04");
    ctx.verdict(all_bold, check, ErrorKind::Font, || {
        "Header row 1 text is not bold throughout".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ValidationMode;
    use tfcu_model::{AuditResults, Cell, CellProperties, Run, RunProperties, Table};

    fn row(index: usize, fill: Option<&str>, run: Option<Run>) -> Row {
        Row {
            index,
            cell_count: 1,
            cells: vec![Cell {
                index: 0,
                properties: CellProperties {
                    shading: fill.map(str::to_string),
                    ..CellProperties::default()
                },
                text: run.as_ref().map(|run| run.text.clone()).unwrap_or_default(),
                runs: run.into_iter().collect(),
            }],
        }
    }

    fn title_run() -> Run {
        Run {
            text: "Loan Payoff Request".to_string(),
            properties: RunProperties {
                size: Some(32),
                color: Some("FFFFFF".to_string()),
                bold: true,
                ..RunProperties::default()
            },
        }
    }

    fn audit(header: Option<Table>) -> AuditResults {
        let document = ExtractedDocument {
            header_table: header,
            ..ExtractedDocument::default()
        };
        let mut ctx = ValidationContext::new(ValidationMode::ReportOnly);
        check(&mut ctx, &document).unwrap();
        ctx.finish()
    }

    fn header(row1: Row, row2: Row) -> Option<Table> {
        Some(Table {
            index: 0,
            row_count: 2,
            rows: vec![row1, row2],
            ..Table::default()
        })
    }

    #[test]
    fn compliant_header_passes_everything() {
        let results = audit(header(
            row(0, Some("154747"), Some(title_run())),
            row(1, Some("E8F4F4"), None),
        ));
        assert!(results.failed().is_empty());
        assert!(results.warnings().is_empty());
        assert_eq!(results.passed().len(), 6);
    }

    #[test]
    fn missing_header_is_single_failure() {
        let results = audit(None);
        assert_eq!(results.results.len(), 1);
        assert_eq!(results.failed()[0].rule_id, "HDR-PRESENT");
    }

    #[test]
    fn identical_backgrounds_warn_without_blocking_other_rules() {
        let results = audit(header(
            row(0, None, Some(title_run())),
            row(1, None, None),
        ));
        let warnings = results.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].rule_id, "HDR-DIFF");
        let failed: Vec<String> = results
            .failed()
            .into_iter()
            .map(|result| result.rule_id.clone())
            .collect();
        assert_eq!(failed, ["HDR-R1-BG", "HDR-R2-BG"]);
    }

    #[test]
    fn dark_teal_on_row_two_fails_with_location() {
        let results = audit(header(
            row(0, Some("154747"), Some(title_run())),
            row(1, Some("154747"), None),
        ));
        let failed = results.failed();
        assert_eq!(failed.len(), 1);
        let error = failed[0].error().unwrap();
        assert_eq!(error.rule, "HDR-R2-BG");
        assert_eq!(error.location, "table[0]/row[1]");
        assert!(error.message.contains("light teal"));
    }

    #[test]
    fn size_falls_back_to_style_defaults() {
        let mut run = title_run();
        run.properties.size = None;
        let document = ExtractedDocument {
            header_table: header(
                row(0, Some("154747"), Some(run)),
                row(1, Some("E8F4F4"), None),
            ),
            style_defaults: Some(tfcu_model::StyleDefaults {
                font: None,
                size: Some(32),
            }),
            ..ExtractedDocument::default()
        };
        let mut ctx = ValidationContext::new(ValidationMode::ReportOnly);
        check(&mut ctx, &document).unwrap();
        assert!(!ctx.has_failures());
    }
}
