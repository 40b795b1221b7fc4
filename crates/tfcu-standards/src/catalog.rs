//! The 54 named requirements of the procedure format.
//!
//! Each entry names one leaf of [`crate::SPEC_CONFIG`]. Audit verdicts point
//! back here through `ValidationResult::spec_ref`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Typography,
    Colors,
    Layout,
    Borders,
    HeaderTable,
    TableWidths,
    Spacing,
    Structure,
    FilenameConventions,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 9] = [
        RuleCategory::Typography,
        RuleCategory::Colors,
        RuleCategory::Layout,
        RuleCategory::Borders,
        RuleCategory::HeaderTable,
        RuleCategory::TableWidths,
        RuleCategory::Spacing,
        RuleCategory::Structure,
        RuleCategory::FilenameConventions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RuleCategory::Typography => "Typography",
            RuleCategory::Colors => "Colors",
            RuleCategory::Layout => "Layout",
            RuleCategory::Borders => "Borders",
            RuleCategory::HeaderTable => "Header Table",
            RuleCategory::TableWidths => "Table Widths",
            RuleCategory::Spacing => "Spacing",
            RuleCategory::Structure => "Structure",
            RuleCategory::FilenameConventions => "Filename Conventions",
        }
    }

    /// Parse a category from a CLI-style name (`header-table`, `colors`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL.into_iter().find(|category| {
            category
                .label()
                .replace(' ', "")
                .eq_ignore_ascii_case(&normalized)
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RuleSpec {
    pub id: &'static str,
    pub category: RuleCategory,
    pub requirement: &'static str,
}

const fn rule(id: &'static str, category: RuleCategory, requirement: &'static str) -> RuleSpec {
    RuleSpec {
        id,
        category,
        requirement,
    }
}

use RuleCategory::{
    Borders, Colors, FilenameConventions, HeaderTable, Layout, Spacing, Structure, TableWidths,
    Typography,
};

pub static RULE_CATALOG: &[RuleSpec] = &[
    rule("T01", Typography, "Body text uses Calibri"),
    rule("T02", Typography, "Code and system values use Consolas"),
    rule("T03", Typography, "Body text is 11pt (22 half-points)"),
    rule("T04", Typography, "Header title is 16pt (32 half-points)"),
    rule("T05", Typography, "Section headings are 14pt (28 half-points)"),
    rule("T06", Typography, "Table and callout text is 10pt (20 half-points)"),
    rule("C01", Colors, "Brand teal is #154747"),
    rule("C02", Colors, "Light teal background is #E8F4F4"),
    rule("C03", Colors, "Header title text is white #FFFFFF"),
    rule("C04", Colors, "Critical callout border is #C00000"),
    rule("C05", Colors, "Warning callout border is #FFC000"),
    rule("C06", Colors, "Info callout border is #2E74B5"),
    rule("C07", Colors, "Tip callout border is #548235"),
    rule("C08", Colors, "Critical callout fill is #FBE4E4"),
    rule("C09", Colors, "Warning callout fill is #FFF2CC"),
    rule("C10", Colors, "Info callout fill is #DEEAF6"),
    rule("C11", Colors, "Tip callout fill is #E2F0D9"),
    rule("L01", Layout, "Top margin is 0.5in (720 DXA)"),
    rule("L02", Layout, "Bottom margin is 0.5in (720 DXA)"),
    rule("L03", Layout, "Left margin is 0.5in (720 DXA)"),
    rule("L04", Layout, "Right margin is 0.5in (720 DXA)"),
    rule("L05", Layout, "Margin and indent tolerance is 20 DXA"),
    rule("B01", Borders, "Callout left border is 3pt (24 eighths)"),
    rule("B02", Borders, "Border width tolerance is 0.5pt (4 eighths)"),
    rule("B03", Borders, "Step/screenshot layout tables have no visible borders"),
    rule("H01", HeaderTable, "Header row 1 background is brand teal"),
    rule("H02", HeaderTable, "Header row 1 text is white"),
    rule("H03", HeaderTable, "Header row 1 text is 16pt"),
    rule("H04", HeaderTable, "Header row 1 text is bold"),
    rule("H05", HeaderTable, "Header row 2 background is light teal"),
    rule("H06", HeaderTable, "Header rows 1 and 2 use different backgrounds"),
    rule("TW01", TableWidths, "Content width is 7.5in (10800 DXA)"),
    rule("TW02", TableWidths, "Header table spans the content width"),
    rule("TW03", TableWidths, "Step table text column is 4.5in (6480 DXA)"),
    rule("TW04", TableWidths, "Step table screenshot column is 3in (4320 DXA)"),
    rule("TW05", TableWidths, "Troubleshooting issue column is 3240 DXA"),
    rule("TW06", TableWidths, "Troubleshooting cause column is 3240 DXA"),
    rule("TW07", TableWidths, "Troubleshooting resolution column is 4320 DXA"),
    rule("TW08", TableWidths, "Revision history date column is 1800 DXA"),
    rule("TW09", TableWidths, "Revision history changes column is 6300 DXA"),
    rule("TW10", TableWidths, "Revision history author column is 2700 DXA"),
    rule("TW11", TableWidths, "Quick reference columns are 5400 DXA"),
    rule("TW12", TableWidths, "Column width tolerance is 20 DXA"),
    rule("S01", Spacing, "Callouts are indented 0.1in (144 DXA)"),
    rule("ST01", Structure, "The first table is the header table"),
    rule("ST02", Structure, "The header table has exactly two rows"),
    rule("ST03", Structure, "An OVERVIEW section is present"),
    rule("ST04", Structure, "A RELATED section is present"),
    rule("ST05", Structure, "A Revision History section is present"),
    rule("ST06", Structure, "The header carries a Date Updated field"),
    rule("ST07", Structure, "The header carries a Department field"),
    rule("ST08", Structure, "Revision history has no empty rows"),
    rule("ST09", Structure, "A primary footer is present"),
    rule(
        "F01",
        FilenameConventions,
        "Files are named Department_Procedure-Name_YYYYMMDD.docx",
    ),
];

/// Look up a catalog entry by ID (case-insensitive).
pub fn rule_spec(id: &str) -> Option<&'static RuleSpec> {
    RULE_CATALOG
        .iter()
        .find(|spec| spec.id.eq_ignore_ascii_case(id))
}

/// Catalog entries of one category, in catalog order.
pub fn rules_in(category: RuleCategory) -> impl Iterator<Item = &'static RuleSpec> {
    RULE_CATALOG
        .iter()
        .filter(move |spec| spec.category == category)
}
