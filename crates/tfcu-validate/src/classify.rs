//! Table-type classification for the table rules.
//!
//! Classification matches literal English substrings in the first row. It
//! breaks on translated or reworded headers; such tables are simply not
//! classified and no table-type rule runs for them.

use tfcu_model::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// One row, two cells: step text beside a screenshot.
    Layout,
    /// Header row mentions both "issue" and "resolution".
    Troubleshooting,
    /// Header row mentions both "date" and "changes".
    RevisionHistory,
}

/// Classify a non-header table. Ambiguous tables yield `None`.
pub fn classify_table(table: &Table) -> Option<TableKind> {
    if table.row_count == 1 && table.rows.first().is_some_and(|row| row.cell_count == 2) {
        return Some(TableKind::Layout);
    }
    let header = table.header_text();
    if header.contains("issue") && header.contains("resolution") {
        return Some(TableKind::Troubleshooting);
    }
    if header.contains("date") && header.contains("changes") {
        return Some(TableKind::RevisionHistory);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfcu_model::{Cell, Row};

    fn table(rows: &[&[&str]]) -> Table {
        let rows: Vec<Row> = rows
            .iter()
            .enumerate()
            .map(|(index, cells)| Row {
                index,
                cell_count: cells.len(),
                cells: cells
                    .iter()
                    .enumerate()
                    .map(|(index, text)| Cell {
                        index,
                        text: (*text).to_string(),
                        ..Cell::default()
                    })
                    .collect(),
            })
            .collect();
        Table {
            row_count: rows.len(),
            rows,
            ..Table::default()
        }
    }

    #[test]
    fn single_row_two_cells_is_layout() {
        assert_eq!(
            classify_table(&table(&[&["Step 1", ""]])),
            Some(TableKind::Layout)
        );
    }

    #[test]
    fn header_keywords_classify_case_insensitively() {
        assert_eq!(
            classify_table(&table(&[&["Issue", "Cause", "Resolution"], &["a", "b", "c"]])),
            Some(TableKind::Troubleshooting)
        );
        assert_eq!(
            classify_table(&table(&[&["Date Updated", "Changes Made", "Author"], &["", "", ""]])),
            Some(TableKind::RevisionHistory)
        );
    }

    #[test]
    fn reworded_headers_are_not_classified() {
        assert_eq!(
            classify_table(&table(&[&["Fecha", "Cambios"], &["x", "y"]])),
            None
        );
    }
}
