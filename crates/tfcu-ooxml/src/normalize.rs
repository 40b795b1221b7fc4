//! Turn raw WordprocessingML trees into an [`ExtractedDocument`].
//!
//! Absent properties take Word's effective defaults where Word has one
//! (1440 DXA margins, single line spacing, zero indent) and stay `None`
//! otherwise.

use std::collections::BTreeMap;

use tfcu_model::{
    Border, Borders, Callout, Cell, CellProperties, DEFAULT_LINE_SPACING, DEFAULT_MARGIN_DXA,
    ExtractedDocument, Indent, MAX_TYPOGRAPHY_SAMPLES, Margins, Paragraph, ParagraphProperties,
    Row, Run, RunProperties, Spacing, StyleDefaults, Table, TableProperties, Typography,
    TypographySample, left_border, normalize_color,
};

use crate::classify::{classify_callout, header_table_candidate};
use crate::xml::XmlElement;

const SAMPLE_TEXT_CHARS: usize = 40;

/// Build the normalized tree from parsed parts.
///
/// `document` is the root of `word/document.xml`; the optional parts are the
/// roots of `word/styles.xml` and `word/footer1.xml`.
pub fn normalize(
    document: &XmlElement,
    styles: Option<&XmlElement>,
    footer: Option<&XmlElement>,
) -> ExtractedDocument {
    let body = document.child("body").unwrap_or(document);

    let paragraphs: Vec<Paragraph> = body
        .descendants_named("p")
        .into_iter()
        .enumerate()
        .map(|(index, element)| paragraph(index, element))
        .collect();

    let tables: Vec<Table> = body
        .all_descendants_named("tbl")
        .into_iter()
        .enumerate()
        .map(|(index, element)| table(index, element))
        .collect();

    let callouts = paragraphs
        .iter()
        .filter_map(|paragraph| {
            classify_callout(paragraph).map(|kind| {
                let left = left_border(&paragraph.properties.borders);
                Callout {
                    paragraph_index: paragraph.index,
                    kind,
                    fill: paragraph.properties.shading.clone().unwrap_or_default(),
                    left_border_color: left.and_then(|border| border.color.clone()),
                    left_border_width: left.and_then(|border| border.size),
                    indent_left: paragraph.properties.indent.left,
                    text: paragraph.text.clone(),
                }
            })
        })
        .collect::<Vec<_>>();

    let header_table = header_table_candidate(&tables).cloned();
    let typography = typography(&paragraphs);

    tracing::debug!(
        paragraphs = paragraphs.len(),
        tables = tables.len(),
        callouts = callouts.len(),
        has_header_table = header_table.is_some(),
        "normalized document body"
    );

    ExtractedDocument {
        margins: margins(body),
        typography,
        tables,
        paragraphs,
        callouts,
        header_table,
        footer: footer.map(footer_paragraphs),
        style_defaults: styles.map(style_defaults),
    }
}

/// Page margins of the final section.
fn margins(body: &XmlElement) -> Option<Margins> {
    let section = body
        .child("sectPr")
        .or_else(|| body.all_descendants_named("sectPr").into_iter().last())?;
    let Some(page_margins) = section.child("pgMar") else {
        return Some(Margins::default());
    };
    let side = |name: &str| {
        page_margins
            .attr(name)
            .and_then(parse_u32)
            .unwrap_or(DEFAULT_MARGIN_DXA)
    };
    Some(Margins {
        top: side("top"),
        bottom: side("bottom"),
        left: side("left"),
        right: side("right"),
    })
}

fn style_defaults(styles: &XmlElement) -> StyleDefaults {
    let run_defaults = styles
        .child("docDefaults")
        .and_then(|defaults| defaults.child("rPrDefault"))
        .and_then(|defaults| defaults.child("rPr"));
    match run_defaults {
        Some(properties) => {
            let properties = run_properties(Some(properties));
            StyleDefaults {
                font: properties.font,
                size: properties.size,
            }
        }
        None => StyleDefaults::default(),
    }
}

fn footer_paragraphs(footer: &XmlElement) -> Vec<Paragraph> {
    footer
        .descendants_named("p")
        .into_iter()
        .enumerate()
        .map(|(index, element)| paragraph(index, element))
        .collect()
}

fn typography(paragraphs: &[Paragraph]) -> Typography {
    let mut typography = Typography::default();
    for run in paragraphs.iter().flat_map(|paragraph| &paragraph.runs) {
        let properties = &run.properties;
        if let Some(font) = &properties.font {
            typography.fonts.insert(font.clone());
        }
        if let Some(size) = properties.size {
            typography.sizes.insert(size);
        }
        if let Some(color) = &properties.color {
            typography.colors.insert(color.clone());
        }
        if typography.samples.len() < MAX_TYPOGRAPHY_SAMPLES && !run.text.trim().is_empty() {
            typography.samples.push(TypographySample {
                text: run.text.chars().take(SAMPLE_TEXT_CHARS).collect(),
                font: properties.font.clone(),
                size: properties.size,
                color: properties.color.clone(),
            });
        }
    }
    typography
}

fn paragraph(index: usize, element: &XmlElement) -> Paragraph {
    let runs: Vec<Run> = element
        .all_descendants_named("r")
        .into_iter()
        .map(run)
        .collect();
    let text = runs.iter().map(|run| run.text.as_str()).collect();
    Paragraph {
        index,
        properties: paragraph_properties(element.child("pPr")),
        text,
        runs,
    }
}

fn paragraph_properties(properties: Option<&XmlElement>) -> ParagraphProperties {
    let Some(properties) = properties else {
        return ParagraphProperties::default();
    };

    let spacing = properties
        .child("spacing")
        .map(|spacing| Spacing {
            before: spacing.attr("before").and_then(parse_u32).unwrap_or(0),
            after: spacing.attr("after").and_then(parse_u32).unwrap_or(0),
            line: spacing
                .attr("line")
                .and_then(parse_u32)
                .unwrap_or(DEFAULT_LINE_SPACING),
        })
        .unwrap_or_default();

    let indent = properties
        .child("ind")
        .map(|ind| {
            let first_line = match ind.attr("hanging").and_then(parse_i32) {
                Some(hanging) => -hanging,
                None => ind.attr("firstLine").and_then(parse_i32).unwrap_or(0),
            };
            Indent {
                left: ind
                    .attr("left")
                    .or_else(|| ind.attr("start"))
                    .and_then(parse_i32)
                    .unwrap_or(0),
                right: ind
                    .attr("right")
                    .or_else(|| ind.attr("end"))
                    .and_then(parse_i32)
                    .unwrap_or(0),
                first_line,
            }
        })
        .unwrap_or_default();

    ParagraphProperties {
        spacing,
        indent,
        alignment: properties
            .child("jc")
            .and_then(|jc| jc.attr("val"))
            .map(str::to_string),
        borders: borders(properties.child("pBdr")),
        shading: shading(properties),
    }
}

fn run(element: &XmlElement) -> Run {
    let mut text = String::new();
    for child in element.elements() {
        match child.name.as_str() {
            "t" | "delText" => text.push_str(&child.text()),
            "tab" => text.push('\t'),
            "br" | "cr" => text.push('\n'),
            "noBreakHyphen" => text.push('-'),
            _ => {}
        }
    }
    Run {
        text,
        properties: run_properties(element.child("rPr")),
    }
}

fn run_properties(properties: Option<&XmlElement>) -> RunProperties {
    let Some(properties) = properties else {
        return RunProperties::default();
    };
    // Latin text renders in `ascii`/`hAnsi`; complex-script and East Asian
    // slots say nothing about it.
    let font = properties.child("rFonts").and_then(|fonts| {
        ["ascii", "hAnsi"]
            .into_iter()
            .find_map(|slot| fonts.attr(slot))
            .map(str::to_string)
    });
    let value = |name: &str| properties.child(name).and_then(|element| element.attr("val"));
    RunProperties {
        font,
        size: value("sz").and_then(parse_u32),
        size_cs: value("szCs").and_then(parse_u32),
        color: value("color").and_then(normalize_color),
        bold: toggle(properties.child("b")),
        italic: toggle(properties.child("i")),
        underline: value("u")
            .filter(|underline| *underline != "none")
            .map(str::to_string),
    }
}

/// On/off property: present without `w:val`, or with a truthy one.
fn toggle(element: Option<&XmlElement>) -> bool {
    element.is_some_and(|element| {
        !matches!(element.attr("val"), Some("0" | "false" | "off"))
    })
}

fn table(index: usize, element: &XmlElement) -> Table {
    let properties = element.child("tblPr");
    let rows: Vec<Row> = element
        .children_named("tr")
        .enumerate()
        .map(|(row_index, row)| {
            let cells: Vec<Cell> = row
                .children_named("tc")
                .enumerate()
                .map(|(cell_index, tc)| cell(cell_index, tc))
                .collect();
            Row {
                index: row_index,
                cell_count: cells.len(),
                cells,
            }
        })
        .collect();
    Table {
        index,
        row_count: rows.len(),
        properties: TableProperties {
            width: properties
                .and_then(|properties| properties.child("tblW"))
                .and_then(dxa_width),
            borders: borders(properties.and_then(|properties| properties.child("tblBorders"))),
        },
        rows,
    }
}

fn cell(index: usize, element: &XmlElement) -> Cell {
    let paragraphs: Vec<Paragraph> = element
        .descendants_named("p")
        .into_iter()
        .enumerate()
        .map(|(index, p)| paragraph(index, p))
        .collect();
    let text = paragraphs
        .iter()
        .map(|paragraph| paragraph.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let runs = paragraphs
        .into_iter()
        .flat_map(|paragraph| paragraph.runs)
        .collect();

    let properties = element.child("tcPr");
    let margins = properties
        .and_then(|properties| properties.child("tcMar"))
        .map(|margins| {
            margins
                .elements()
                .filter_map(|side| Some((side.name.clone(), side.attr("w").and_then(parse_u32)?)))
                .collect::<BTreeMap<_, _>>()
        })
        .unwrap_or_default();

    Cell {
        index,
        properties: CellProperties {
            shading: properties.and_then(shading),
            width: properties
                .and_then(|properties| properties.child("tcW"))
                .and_then(dxa_width),
            vertical_align: properties
                .and_then(|properties| properties.child("vAlign"))
                .and_then(|align| align.attr("val"))
                .map(str::to_string),
            borders: borders(properties.and_then(|properties| properties.child("tcBorders"))),
            margins,
        },
        text,
        runs,
    }
}

/// Normalized `w:shd/@w:fill` of a property container.
fn shading(properties: &XmlElement) -> Option<String> {
    properties
        .child("shd")
        .and_then(|shd| shd.attr("fill"))
        .and_then(normalize_color)
}

/// Width in DXA; percentage and auto widths are not comparable and yield `None`.
fn dxa_width(element: &XmlElement) -> Option<u32> {
    match element.attr("type") {
        None | Some("dxa") => element.attr("w").and_then(parse_u32),
        Some(_) => None,
    }
}

fn borders(container: Option<&XmlElement>) -> Borders {
    let Some(container) = container else {
        return Borders::new();
    };
    container
        .elements()
        .map(|edge| {
            (
                edge.name.clone(),
                Border {
                    style: edge.attr("val").unwrap_or_default().to_string(),
                    size: edge.attr("sz").and_then(parse_u32),
                    color: edge.attr("color").and_then(normalize_color),
                    space: edge.attr("space").and_then(parse_u32),
                },
            )
        })
        .collect()
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

fn parse_i32(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse;
    use tfcu_model::CalloutKind;

    fn document(body: &str) -> ExtractedDocument {
        let xml = format!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let root = parse("word/document.xml", &xml).unwrap();
        normalize(&root, None, None)
    }

    #[test]
    fn missing_section_properties_leave_margins_absent() {
        let doc = document("<w:p/>");
        assert_eq!(doc.margins, None);
    }

    #[test]
    fn missing_margin_attributes_default_to_one_inch() {
        let doc = document(r#"<w:sectPr><w:pgMar w:top="720" w:left="720"/></w:sectPr>"#);
        let margins = doc.margins.unwrap();
        assert_eq!(margins.top, 720);
        assert_eq!(margins.left, 720);
        assert_eq!(margins.bottom, DEFAULT_MARGIN_DXA);
        assert_eq!(margins.right, DEFAULT_MARGIN_DXA);
    }

    #[test]
    fn paragraph_defaults_apply_without_ppr() {
        let doc = document("<w:p><w:r><w:t>Plain</w:t></w:r></w:p>");
        let paragraph = &doc.paragraphs[0];
        assert_eq!(paragraph.text, "Plain");
        assert_eq!(paragraph.properties.spacing.line, DEFAULT_LINE_SPACING);
        assert_eq!(paragraph.properties.indent, Indent::default());
    }

    #[test]
    fn run_properties_are_normalized() {
        let doc = document(
            r#"<w:p><w:r><w:rPr><w:rFonts w:ascii="Calibri"/><w:b/><w:i w:val="0"/><w:sz w:val="22"/><w:color w:val="c00000"/></w:rPr><w:t>Hi</w:t></w:r></w:p>"#,
        );
        let properties = &doc.paragraphs[0].runs[0].properties;
        assert_eq!(properties.font.as_deref(), Some("Calibri"));
        assert_eq!(properties.size, Some(22));
        assert_eq!(properties.color.as_deref(), Some("C00000"));
        assert!(properties.bold);
        assert!(!properties.italic);
        assert!(doc.typography.fonts.contains("Calibri"));
        assert_eq!(doc.typography.samples.len(), 1);
    }

    #[test]
    fn east_asian_font_slot_is_not_the_run_font() {
        let doc = document(
            r#"<w:p><w:r><w:rPr><w:rFonts w:asciiTheme="minorHAnsi" w:eastAsia="MS Mincho" w:cs="Arial"/></w:rPr><w:t>Hi</w:t></w:r></w:p>"#,
        );
        assert_eq!(doc.paragraphs[0].runs[0].properties.font, None);
        assert!(doc.typography.fonts.is_empty());

        let doc = document(
            r#"<w:p><w:r><w:rPr><w:rFonts w:hAnsi="Consolas" w:eastAsia="MS Mincho"/></w:rPr><w:t>Hi</w:t></w:r></w:p>"#,
        );
        assert_eq!(doc.paragraphs[0].runs[0].properties.font.as_deref(), Some("Consolas"));
    }

    #[test]
    fn text_box_fallback_is_extracted_once() {
        let text_box_table = r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Date Updated</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Changes Made</w:t></w:r></w:p></w:tc></w:tr><w:tr><w:tc><w:p/></w:tc><w:tc><w:p/></w:tc></w:tr></w:tbl>"#;
        let doc = document(&format!(
            r#"<w:p><w:r><mc:AlternateContent xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006"><mc:Choice Requires="wps"><w:drawing><w:txbxContent>{text_box_table}</w:txbxContent></w:drawing></mc:Choice><mc:Fallback><w:pict><w:txbxContent>{text_box_table}</w:txbxContent></w:pict></mc:Fallback></mc:AlternateContent></w:r></w:p>"#
        ));
        assert_eq!(doc.tables.len(), 1);
        assert_eq!(doc.tables[0].row_count, 2);
        assert_eq!(doc.paragraphs.len(), 1);
        assert_eq!(doc.paragraphs[0].text, "Date UpdatedChanges Made");
    }

    #[test]
    fn hanging_indent_is_negative_first_line() {
        let doc = document(r#"<w:p><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:p>"#);
        let indent = doc.paragraphs[0].properties.indent;
        assert_eq!(indent.left, 720);
        assert_eq!(indent.first_line, -360);
    }

    #[test]
    fn table_cells_carry_shading_and_text() {
        let doc = document(
            r#"<w:tbl><w:tblPr><w:tblW w:w="10800" w:type="dxa"/></w:tblPr>
               <w:tr><w:tc><w:tcPr><w:shd w:val="clear" w:fill="154747"/></w:tcPr><w:p><w:r><w:t>Title</w:t></w:r></w:p></w:tc></w:tr>
               <w:tr><w:tc><w:p><w:r><w:t>Department:</w:t></w:r></w:p></w:tc></w:tr>
               </w:tbl>"#,
        );
        assert_eq!(doc.tables.len(), 1);
        let table = &doc.tables[0];
        assert_eq!(table.row_count, 2);
        assert_eq!(table.properties.width, Some(10800));
        assert_eq!(table.rows[0].shading(), Some("154747"));
        assert_eq!(table.rows[1].cells[0].text, "Department:");
        assert!(doc.header_table.is_some());
        // Cell paragraphs are also body paragraphs.
        assert_eq!(doc.paragraphs.len(), 2);
    }

    #[test]
    fn shaded_bordered_paragraph_becomes_callout() {
        let doc = document(
            r#"<w:p><w:pPr><w:pBdr><w:left w:val="single" w:sz="24" w:space="4" w:color="C00000"/></w:pBdr><w:shd w:val="clear" w:fill="FBE4E4"/><w:ind w:left="144"/></w:pPr><w:r><w:t>Stop</w:t></w:r></w:p>"#,
        );
        assert_eq!(doc.callouts.len(), 1);
        let callout = &doc.callouts[0];
        assert_eq!(callout.kind, CalloutKind::Critical);
        assert_eq!(callout.left_border_color.as_deref(), Some("C00000"));
        assert_eq!(callout.left_border_width, Some(24));
        assert_eq!(callout.indent_left, 144);
    }

    #[test]
    fn style_defaults_come_from_doc_defaults() {
        let styles = parse(
            "word/styles.xml",
            r#"<w:styles><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault></w:docDefaults></w:styles>"#,
        )
        .unwrap();
        let root = parse("word/document.xml", "<w:document><w:body/></w:document>").unwrap();
        let doc = normalize(&root, Some(&styles), None);
        assert_eq!(
            doc.style_defaults,
            Some(StyleDefaults {
                font: Some("Calibri".to_string()),
                size: Some(22),
            })
        );
        assert_eq!(doc.footer, None);
    }
}
