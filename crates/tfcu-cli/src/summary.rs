use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tfcu_model::Category;
use tfcu_standards::RuleSpec;

use crate::types::AuditOutcome;

pub fn print_summary(outcome: &AuditOutcome) {
    println!("Document: {}", outcome.document.display());
    if let Some(path) = &outcome.output {
        println!("Report: {}", path.display());
    }
    println!("{}", summary_table(outcome));
    println!(
        "Compliance: {:.1}% ({} passed, {} failed, {} warnings)",
        outcome.summary.compliance_percentage,
        outcome.summary.passed,
        outcome.summary.failed,
        outcome.summary.warnings
    );
}

/// Per-category tallies with a total row.
pub fn summary_table(outcome: &AuditOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Passed"),
        header_cell("Failed"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for category in Category::ALL {
        let Some(tally) = outcome.categories.get(&category) else {
            continue;
        };
        table.add_row(vec![
            Cell::new(category.label()),
            count_cell(tally.passed, Color::Green),
            count_cell(tally.failed, Color::Red),
            count_cell(tally.warnings, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(outcome.summary.passed, Color::Green).add_attribute(Attribute::Bold),
        count_cell(outcome.summary.failed, Color::Red).add_attribute(Attribute::Bold),
        count_cell(outcome.summary.warnings, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn rules_table<'a>(rules: impl IntoIterator<Item = &'a RuleSpec>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Category"),
        header_cell("Requirement"),
    ]);
    apply_table_style(&mut table);
    for rule in rules {
        table.add_row(vec![
            Cell::new(rule.id).add_attribute(Attribute::Bold),
            Cell::new(rule.category.label()),
            Cell::new(rule.requirement),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Zero counts are dimmed; non-zero counts take the category color.
fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        Cell::new(count).fg(Color::DarkGrey)
    } else {
        Cell::new(count).fg(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfcu_standards::{RULE_CATALOG, RuleCategory, rules_in};

    #[test]
    fn rules_table_has_one_row_per_rule() {
        let table = rules_table(RULE_CATALOG);
        assert_eq!(table.row_count(), RULE_CATALOG.len());
        let colors = rules_table(rules_in(RuleCategory::Colors));
        assert_eq!(colors.row_count(), 11);
    }
}
