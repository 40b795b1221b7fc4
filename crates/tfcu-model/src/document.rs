//! Normalized property tree extracted from one `.docx`.
//!
//! All measurements stay in their native OOXML unit: DXA for distances,
//! half-points for font sizes and eighths of a point for border widths.
//! Conversion is the rule engine's job.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Word's default page margin (1 inch).
pub const DEFAULT_MARGIN_DXA: u32 = 1440;

/// Single line spacing in 240ths of a line.
pub const DEFAULT_LINE_SPACING: u32 = 240;

/// Maximum number of typography samples kept for diagnostics.
pub const MAX_TYPOGRAPHY_SAMPLES: usize = 20;

/// Everything the rule engine knows about a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Page margins, absent when the body has no section properties.
    pub margins: Option<Margins>,
    pub typography: Typography,
    pub tables: Vec<Table>,
    pub paragraphs: Vec<Paragraph>,
    pub callouts: Vec<Callout>,
    /// First table of the document when it has exactly two rows.
    pub header_table: Option<Table>,
    /// Paragraphs of the primary footer part.
    pub footer: Option<Vec<Paragraph>>,
    /// Run defaults from `styles.xml`.
    pub style_defaults: Option<StyleDefaults>,
}

impl ExtractedDocument {
    /// Every text fragment of the body in document order.
    ///
    /// Paragraph text already includes paragraphs nested in table cells.
    pub fn body_text(&self) -> impl Iterator<Item = &str> {
        self.paragraphs.iter().map(|paragraph| paragraph.text.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: DEFAULT_MARGIN_DXA,
            bottom: DEFAULT_MARGIN_DXA,
            left: DEFAULT_MARGIN_DXA,
            right: DEFAULT_MARGIN_DXA,
        }
    }
}

/// Distinct typography values observed across all runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    pub fonts: BTreeSet<String>,
    pub sizes: BTreeSet<u32>,
    /// Normalized six-digit colors.
    pub colors: BTreeSet<String>,
    pub samples: Vec<TypographySample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypographySample {
    pub text: String,
    pub font: Option<String>,
    pub size: Option<u32>,
    pub color: Option<String>,
}

/// Document-wide run defaults (`w:docDefaults/w:rPrDefault`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDefaults {
    pub font: Option<String>,
    pub size: Option<u32>,
}

/// One border edge (`w:top`, `w:left`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Border {
    /// `w:val`, e.g. `single` or `none`.
    pub style: String,
    /// Width in eighths of a point.
    pub size: Option<u32>,
    pub color: Option<String>,
    pub space: Option<u32>,
}

impl Border {
    pub fn is_visible(&self) -> bool {
        !matches!(self.style.as_str(), "none" | "nil" | "") && self.size != Some(0)
    }
}

/// Border edges keyed by side name (`top`, `left`, `insideH`, ...).
pub type Borders = BTreeMap<String, Border>;

/// Left edge, honoring the bidi-neutral `start` alias.
pub fn left_border(borders: &Borders) -> Option<&Border> {
    borders.get("left").or_else(|| borders.get("start"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub index: usize,
    pub row_count: usize,
    pub properties: TableProperties,
    pub rows: Vec<Row>,
}

impl Table {
    /// Lowercased text of the first row, used for table classification.
    pub fn header_text(&self) -> String {
        self.rows
            .first()
            .map(|row| {
                row.cells
                    .iter()
                    .map(|cell| cell.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_lowercase()
            })
            .unwrap_or_default()
    }

    pub fn has_visible_borders(&self) -> bool {
        let table_level = self.properties.borders.values().any(Border::is_visible);
        let cell_level = self
            .rows
            .iter()
            .flat_map(|row| &row.cells)
            .flat_map(|cell| cell.properties.borders.values())
            .any(Border::is_visible);
        table_level || cell_level
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableProperties {
    /// `w:tblW/@w:w` in DXA.
    pub width: Option<u32>,
    pub borders: Borders,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub index: usize,
    pub cell_count: usize,
    pub cells: Vec<Cell>,
}

impl Row {
    /// True when every cell is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.text.trim().is_empty())
    }

    /// Background of the first cell that declares one.
    pub fn shading(&self) -> Option<&str> {
        self.cells
            .iter()
            .find_map(|cell| cell.properties.shading.as_deref())
    }

    /// Runs that carry visible text.
    pub fn text_runs(&self) -> impl Iterator<Item = &Run> {
        self.cells
            .iter()
            .flat_map(|cell| &cell.runs)
            .filter(|run| !run.text.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub index: usize,
    pub properties: CellProperties,
    pub text: String,
    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellProperties {
    /// Normalized `w:shd/@w:fill`.
    pub shading: Option<String>,
    pub width: Option<u32>,
    pub vertical_align: Option<String>,
    pub borders: Borders,
    /// Cell margins in DXA keyed by side.
    pub margins: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub index: usize,
    pub properties: ParagraphProperties,
    pub text: String,
    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphProperties {
    pub spacing: Spacing,
    pub indent: Indent,
    pub alignment: Option<String>,
    pub borders: Borders,
    /// Normalized `w:shd/@w:fill`.
    pub shading: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
    pub line: u32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            before: 0,
            after: 0,
            line: DEFAULT_LINE_SPACING,
        }
    }
}

/// Paragraph indentation in DXA. `first_line` is negative for hanging indents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indent {
    pub left: i32,
    pub right: i32,
    pub first_line: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub properties: RunProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProperties {
    pub font: Option<String>,
    /// Half-points.
    pub size: Option<u32>,
    pub size_cs: Option<u32>,
    /// Normalized six-digit color.
    pub color: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: Option<String>,
}

/// Severity carried by a callout paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutKind {
    Critical,
    Warning,
    Info,
    Tip,
}

impl CalloutKind {
    pub const ALL: [CalloutKind; 4] = [
        CalloutKind::Critical,
        CalloutKind::Warning,
        CalloutKind::Info,
        CalloutKind::Tip,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CalloutKind::Critical => "critical",
            CalloutKind::Warning => "warning",
            CalloutKind::Info => "info",
            CalloutKind::Tip => "tip",
        }
    }

    /// Parse a callout type name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for CalloutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A paragraph classified as a callout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callout {
    /// Index into [`ExtractedDocument::paragraphs`].
    pub paragraph_index: usize,
    pub kind: CalloutKind,
    pub fill: String,
    pub left_border_color: Option<String>,
    pub left_border_width: Option<u32>,
    pub indent_left: i32,
    pub text: String,
}
