//! The rule table: every expected value of the TFCU procedure format.
//!
//! [`SPEC_CONFIG`] is a compile-time constant. All leaves are primitives or
//! `&'static` data, so there is no way to change it at runtime.

use tfcu_model::CalloutKind;

/// Rule table version, reported for provenance only.
pub const SPEC_VERSION: &str = "6.0.4";

#[derive(Debug)]
pub struct SpecConfig {
    pub version: &'static str,
    pub fonts: FontRules,
    pub font_sizes: FontSizeRules,
    pub colors: ColorRules,
    pub layout: LayoutRules,
    pub borders: BorderRules,
    pub header_table: HeaderTableRules,
    pub table_widths: TableWidthRules,
    pub spacing: SpacingRules,
    pub structure: StructureRules,
    pub filename: FilenameRules,
}

#[derive(Debug)]
pub struct FontRules {
    pub primary: &'static str,
    pub monospace: &'static str,
}

impl FontRules {
    pub fn permitted(&self) -> [&'static str; 2] {
        [self.primary, self.monospace]
    }

    pub fn is_permitted(&self, font: &str) -> bool {
        self.permitted()
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(font.trim()))
    }
}

/// Font sizes in half-points.
#[derive(Debug)]
pub struct FontSizeRules {
    pub body: u32,
    pub title: u32,
    pub heading: u32,
    pub table: u32,
    pub footer: u32,
    pub known: &'static [u32],
}

impl FontSizeRules {
    pub fn is_known(&self, size: u32) -> bool {
        self.known.contains(&size)
    }
}

#[derive(Debug)]
pub struct CalloutStyle {
    pub kind: CalloutKind,
    pub fill: &'static str,
    pub border: &'static str,
}

#[derive(Debug)]
pub struct ColorRules {
    pub primary: &'static str,
    pub light_teal: &'static str,
    pub header_text: &'static str,
    pub callouts: [CalloutStyle; 4],
}

impl ColorRules {
    pub fn callout(&self, kind: CalloutKind) -> &CalloutStyle {
        self.callouts
            .iter()
            .find(|style| style.kind == kind)
            .unwrap_or(&self.callouts[0])
    }

    /// Callout kind whose background matches `fill`, if any.
    pub fn callout_for_fill(&self, fill: &str) -> Option<CalloutKind> {
        self.callouts
            .iter()
            .find(|style| tfcu_model::colors_match(fill, style.fill))
            .map(|style| style.kind)
    }
}

/// Page margins in DXA.
#[derive(Debug)]
pub struct MarginRules {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

#[derive(Debug)]
pub struct LayoutRules {
    pub margins: MarginRules,
    /// Absolute tolerance in DXA for margins and indents.
    pub tolerance: u32,
}

/// Border widths in eighths of a point.
#[derive(Debug)]
pub struct BorderRules {
    pub callout_left_width: u32,
    pub width_tolerance: u32,
    /// Step/screenshot layout tables carry no visible borders.
    pub layout_tables_borderless: bool,
}

#[derive(Debug)]
pub struct HeaderRowRules {
    pub background: &'static str,
    pub text_color: &'static str,
    pub font_size: u32,
    pub bold: bool,
}

#[derive(Debug)]
pub struct HeaderTableRules {
    pub row_count: usize,
    pub row1: HeaderRowRules,
    pub row2: HeaderRowRules,
    /// Row 1 and row 2 must use different backgrounds.
    pub rows_differentiated: bool,
}

/// Column widths in DXA.
#[derive(Debug)]
pub struct TableWidthRules {
    pub content: u32,
    pub header_table: u32,
    pub step_text: u32,
    pub step_image: u32,
    pub troubleshooting: [u32; 3],
    pub revision: [u32; 3],
    pub quick_reference: u32,
    pub tolerance: u32,
}

#[derive(Debug)]
pub struct SpacingRules {
    /// Left indent of callout paragraphs in DXA.
    pub callout_indent: i32,
}

#[derive(Debug)]
pub struct RequiredField {
    pub name: &'static str,
    pub markers: &'static [&'static str],
}

#[derive(Debug)]
pub struct StructureRules {
    pub required_sections: &'static [&'static str],
    pub required_fields: &'static [RequiredField],
    pub footer_required: bool,
    pub revision_rows_populated: bool,
    pub sentence_length: SentenceLengthRules,
}

/// Word counts per sentence; both limits are advisory.
#[derive(Debug)]
pub struct SentenceLengthRules {
    pub target_max: usize,
    pub absolute_max: usize,
}

#[derive(Debug)]
pub struct FilenameRules {
    pub pattern: &'static str,
    pub example: &'static str,
}

const TEAL: &str = "154747";
const LIGHT_TEAL: &str = "E8F4F4";
const WHITE: &str = "FFFFFF";

pub static SPEC_CONFIG: SpecConfig = SpecConfig {
    version: SPEC_VERSION,
    fonts: FontRules {
        primary: "Calibri",
        monospace: "Consolas",
    },
    font_sizes: FontSizeRules {
        body: 22,
        title: 32,
        heading: 28,
        table: 20,
        footer: 16,
        known: &[16, 18, 20, 22, 24, 28, 32],
    },
    colors: ColorRules {
        primary: TEAL,
        light_teal: LIGHT_TEAL,
        header_text: WHITE,
        callouts: [
            CalloutStyle {
                kind: CalloutKind::Critical,
                fill: "FBE4E4",
                border: "C00000",
            },
            CalloutStyle {
                kind: CalloutKind::Warning,
                fill: "FFF2CC",
                border: "FFC000",
            },
            CalloutStyle {
                kind: CalloutKind::Info,
                fill: "DEEAF6",
                border: "2E74B5",
            },
            CalloutStyle {
                kind: CalloutKind::Tip,
                fill: "E2F0D9",
                border: "548235",
            },
        ],
    },
    layout: LayoutRules {
        margins: MarginRules {
            top: 720,
            bottom: 720,
            left: 720,
            right: 720,
        },
        tolerance: 20,
    },
    borders: BorderRules {
        callout_left_width: 24,
        width_tolerance: 4,
        layout_tables_borderless: true,
    },
    header_table: HeaderTableRules {
        row_count: 2,
        row1: HeaderRowRules {
            background: TEAL,
            text_color: WHITE,
            font_size: 32,
            bold: true,
        },
        row2: HeaderRowRules {
            background: LIGHT_TEAL,
            text_color: "000000",
            font_size: 20,
            bold: false,
        },
        rows_differentiated: true,
    },
    table_widths: TableWidthRules {
        content: 10800,
        header_table: 10800,
        step_text: 6480,
        step_image: 4320,
        troubleshooting: [3240, 3240, 4320],
        revision: [1800, 6300, 2700],
        quick_reference: 5400,
        tolerance: 20,
    },
    spacing: SpacingRules {
        callout_indent: 144,
    },
    structure: StructureRules {
        required_sections: &["OVERVIEW", "RELATED", "Revision History"],
        required_fields: &[
            RequiredField {
                name: "Date Updated",
                markers: &["Date Updated:", "Date updated:"],
            },
            RequiredField {
                name: "Department",
                markers: &["Department:"],
            },
        ],
        footer_required: true,
        revision_rows_populated: true,
        sentence_length: SentenceLengthRules {
            target_max: 25,
            absolute_max: 35,
        },
    },
    filename: FilenameRules {
        pattern: r"^[A-Za-z0-9]+_[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*_\d{8}\.docx$",
        example: "Lending_Loan-Payoff-Request_20250115.docx",
    },
};
