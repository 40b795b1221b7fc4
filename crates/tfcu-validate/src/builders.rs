//! Validated builders for generating compliant procedure elements.
//!
//! Each builder checks its inputs on the given [`ValidationContext`] and
//! produces elements that pass the audit rules for the same element. The
//! context mode decides whether a bad input stops generation.

use std::sync::LazyLock;

use regex::Regex;
use tfcu_model::{
    Border, Borders, CalloutKind, Category, Cell, CellProperties, ErrorKind, Indent, Paragraph,
    ParagraphProperties, Row, Run, RunProperties, Table, TableProperties, ValidationError,
};
use tfcu_standards::SPEC_CONFIG;

use crate::context::{RuleCheck, ValidationContext};

static FILENAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(SPEC_CONFIG.filename.pattern).expect("Invalid filename convention regex")
});

const FIELD_SEPARATOR: &str = "  |  ";

/// One revision history entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionEntry {
    pub date: String,
    pub changes: String,
    pub author: String,
}

impl RevisionEntry {
    pub fn new(
        date: impl Into<String>,
        changes: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            changes: changes.into(),
            author: author.into(),
        }
    }

    fn is_blank(&self) -> bool {
        [&self.date, &self.changes, &self.author]
            .iter()
            .all(|value| value.trim().is_empty())
    }
}

/// Check a filename against `Department_Procedure-Name_YYYYMMDD.docx`.
pub fn validate_filename(ctx: &mut ValidationContext, name: &str) -> Result<(), ValidationError> {
    let filename = &SPEC_CONFIG.filename;
    let check = RuleCheck::new(
        Category::Structure,
        "FILENAME",
        "Filename follows the naming convention",
    )
    .values(name, filename.example)
    .spec_ref("F01");
    ctx.verdict(
        FILENAME_REGEX.is_match(name),
        check,
        ErrorKind::Filename,
        || {
            format!(
                "Filename '{name}' does not follow Department_Procedure-Name_YYYYMMDD.docx (e.g. {})",
                filename.example
            )
        },
    )
}

/// Build the two-row header table: title row plus a metadata row of
/// `Label: value` fields.
pub fn build_header_table(
    ctx: &mut ValidationContext,
    title: &str,
    fields: &[(&str, &str)],
) -> Result<Table, ValidationError> {
    let rules = &SPEC_CONFIG.header_table;
    let mut ctx = ctx.scope("header_table");

    let title = title.trim();
    let check = RuleCheck::new(Category::HeaderTable, "INPUT-TITLE", "Header title is provided")
        .values(if title.is_empty() { "empty" } else { title }, "non-empty title");
    ctx.verdict(!title.is_empty(), check, ErrorKind::Input, || {
        "Header table title is empty".to_string()
    })?;

    for (label, value) in fields {
        let label = label.trim().trim_end_matches(':');
        let check = RuleCheck::new(
            Category::HeaderTable,
            format!("INPUT-FIELD-{}", label.to_uppercase().replace(' ', "-")),
            format!("Header field {label} has a value"),
        )
        .values(value.trim(), "non-empty value");
        ctx.verdict(!value.trim().is_empty(), check, ErrorKind::Input, || {
            format!("Header field '{label}' is empty")
        })?;
    }

    let width = SPEC_CONFIG.table_widths.header_table;
    let title_row = single_cell_row(
        0,
        rules.row1.background,
        width,
        vec![run(title, rules.row1.font_size, rules.row1.text_color, rules.row1.bold)],
    );
    let metadata = fields
        .iter()
        .map(|(label, value)| {
            format!(
                "{}: {}",
                label.trim().trim_end_matches(':'),
                value.trim()
            )
        })
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR);
    let metadata_row = single_cell_row(
        1,
        rules.row2.background,
        width,
        vec![run(
            &metadata,
            rules.row2.font_size,
            rules.row2.text_color,
            rules.row2.bold,
        )],
    );

    Ok(Table {
        index: 0,
        row_count: 2,
        properties: TableProperties {
            width: Some(width),
            borders: Borders::new(),
        },
        rows: vec![title_row, metadata_row],
    })
}

/// Build a callout paragraph of the named kind.
///
/// Returns `Ok(None)` when the kind is unknown and the context did not stop.
pub fn build_callout(
    ctx: &mut ValidationContext,
    kind: &str,
    text: &str,
) -> Result<Option<Paragraph>, ValidationError> {
    let mut ctx = ctx.scope("callout");
    let names = CalloutKind::ALL.map(CalloutKind::as_str).join(", ");
    let parsed = CalloutKind::from_name(kind);
    let check = RuleCheck::new(Category::Callouts, "INPUT-CALLOUT-KIND", "Callout kind is known")
        .values(kind, &names);
    ctx.verdict(parsed.is_some(), check, ErrorKind::Callout, || {
        format!("Unknown callout kind '{kind}'; expected one of {names}")
    })?;
    let Some(kind) = parsed else {
        return Ok(None);
    };

    let check = RuleCheck::new(Category::Callouts, "INPUT-CALLOUT-TEXT", "Callout text is provided")
        .values(if text.trim().is_empty() { "empty" } else { "present" }, "non-empty text");
    ctx.verdict(!text.trim().is_empty(), check, ErrorKind::Input, || {
        format!("{kind} callout text is empty")
    })?;

    let style = SPEC_CONFIG.colors.callout(kind);
    let mut borders = Borders::new();
    borders.insert(
        "left".to_string(),
        Border {
            style: "single".to_string(),
            size: Some(SPEC_CONFIG.borders.callout_left_width),
            color: Some(style.border.to_string()),
            space: Some(4),
        },
    );
    let body = run(text.trim(), SPEC_CONFIG.font_sizes.table, "000000", false);
    Ok(Some(Paragraph {
        index: 0,
        properties: ParagraphProperties {
            indent: Indent {
                left: SPEC_CONFIG.spacing.callout_indent,
                ..Indent::default()
            },
            borders,
            shading: Some(style.fill.to_string()),
            ..ParagraphProperties::default()
        },
        text: body.text.clone(),
        runs: vec![body],
    }))
}

/// Build a revision history table. Blank entries are rejected and never
/// become rows.
pub fn build_revision_table(
    ctx: &mut ValidationContext,
    entries: &[RevisionEntry],
) -> Result<Table, ValidationError> {
    let [date_width, changes_width, author_width] = SPEC_CONFIG.table_widths.revision;
    let widths = [date_width, changes_width, author_width];
    let mut ctx = ctx.scope("revision_history");

    let mut rows = vec![text_row(0, &["Date Updated", "Changes Made", "Author"], widths, true)];
    for (position, entry) in entries.iter().enumerate() {
        if entry.is_blank() {
            let mut ctx = ctx.scope(format!("entry[{position}]"));
            let check = RuleCheck::new(
                Category::Tables,
                format!("INPUT-REVISION-{position}"),
                "Revision entry is populated",
            )
            .values("empty entry", "date, changes and author")
            .spec_ref("ST08");
            ctx.fail(
                check,
                ErrorKind::Table,
                format!("Revision entry {position} is empty and was skipped"),
            )?;
            continue;
        }
        let index = rows.len();
        rows.push(text_row(
            index,
            &[
                entry.date.as_str(),
                entry.changes.as_str(),
                entry.author.as_str(),
            ],
            widths,
            false,
        ));
    }

    Ok(Table {
        index: 0,
        row_count: rows.len(),
        properties: TableProperties {
            width: Some(SPEC_CONFIG.table_widths.content),
            borders: Borders::new(),
        },
        rows,
    })
}

fn run(text: &str, size: u32, color: &str, bold: bool) -> Run {
    Run {
        text: text.to_string(),
        properties: RunProperties {
            font: Some(SPEC_CONFIG.fonts.primary.to_string()),
            size: Some(size),
            size_cs: Some(size),
            color: Some(color.to_string()),
            bold,
            ..RunProperties::default()
        },
    }
}

fn single_cell_row(index: usize, fill: &str, width: u32, runs: Vec<Run>) -> Row {
    let text = runs.iter().map(|run| run.text.as_str()).collect();
    Row {
        index,
        cell_count: 1,
        cells: vec![Cell {
            index: 0,
            properties: CellProperties {
                shading: Some(fill.to_string()),
                width: Some(width),
                ..CellProperties::default()
            },
            text,
            runs,
        }],
    }
}

fn text_row(index: usize, values: &[&str; 3], widths: [u32; 3], bold: bool) -> Row {
    let cells = values
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(cell_index, (value, width))| {
            let value = value.trim();
            Cell {
                index: cell_index,
                properties: CellProperties {
                    width: Some(width),
                    ..CellProperties::default()
                },
                text: value.to_string(),
                runs: vec![run(value, SPEC_CONFIG.font_sizes.table, "000000", bold)],
            }
        })
        .collect::<Vec<_>>();
    Row {
        index,
        cell_count: cells.len(),
        cells,
    }
}
