//! Content tables: step layouts, troubleshooting and revision history.

use tfcu_model::{Category, ErrorKind, ExtractedDocument, Table, ValidationError};
use tfcu_standards::SPEC_CONFIG;

use crate::classify::{TableKind, classify_table};
use crate::context::{RuleCheck, ValidationContext};

pub fn check(
    ctx: &mut ValidationContext,
    document: &ExtractedDocument,
) -> Result<(), ValidationError> {
    let header_index = document.header_table.as_ref().map(|table| table.index);

    for table in &document.tables {
        if Some(table.index) == header_index {
            continue;
        }
        let Some(kind) = classify_table(table) else {
            continue;
        };
        let mut ctx = ctx.scope(format!("table[{}]", table.index));
        match kind {
            TableKind::Layout => check_layout(&mut ctx, table),
            TableKind::RevisionHistory => check_revision_history(&mut ctx, table)?,
            TableKind::Troubleshooting => {
                tracing::debug!(table = table.index, "troubleshooting table detected");
            }
        }
    }
    Ok(())
}

fn check_layout(ctx: &mut ValidationContext, table: &Table) {
    let bordered = table.has_visible_borders();
    let check = RuleCheck::new(
        Category::Tables,
        format!("TBL-LAYOUT-{}", table.index),
        "Step layout table has no visible borders",
    )
    .values(if bordered { "visible borders" } else { "none" }, "none")
    .spec_ref("B03");
    if bordered && SPEC_CONFIG.borders.layout_tables_borderless {
        ctx.warn(
            check,
            ErrorKind::Border,
            format!("Layout table {} has visible borders", table.index),
        );
    } else {
        ctx.pass(check);
    }
}

fn check_revision_history(
    ctx: &mut ValidationContext,
    table: &Table,
) -> Result<(), ValidationError> {
    if !SPEC_CONFIG.structure.revision_rows_populated {
        return Ok(());
    }
    let mut blank_rows = 0;
    for row in table.rows.iter().skip(1).filter(|row| row.is_blank()) {
        blank_rows += 1;
        let mut ctx = ctx.scope(format!("row[{}]", row.index));
        let check = RuleCheck::new(
            Category::Tables,
            format!("TBL-RH-{}-ROW-{}", table.index, row.index),
            "Revision history rows are populated",
        )
        .values("empty row", "date, changes and author")
        .spec_ref("ST08");
        ctx.fail(
            check,
            ErrorKind::Table,
            format!("Revision history row {} is empty", row.index),
        )?;
    }
    if blank_rows == 0 {
        let data_rows = table.row_count.saturating_sub(1);
        let check = RuleCheck::new(
            Category::Tables,
            format!("TBL-RH-{}", table.index),
            "Revision history rows are populated",
        )
        .values(format!("{data_rows} populated rows"), "no empty rows")
        .spec_ref("ST08");
        ctx.pass(check);
    }
    Ok(())
}
