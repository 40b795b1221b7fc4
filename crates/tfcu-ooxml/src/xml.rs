//! Minimal owned element tree over quick-xml events.
//!
//! Namespace prefixes are dropped from element and attribute names, so
//! `w:tbl` is looked up as `tbl` and `w:val` as `val`. Local names do collide
//! across namespaces (OMML has its own `r` and `t`), so subtrees whose names
//! would be misread are dropped while parsing; see [`SKIPPED_SUBTREES`].

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;

use crate::error::{OoxmlError, Result};

#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

#[derive(Debug, Clone)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct element children.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.name == name)
    }

    /// Direct children with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |element| element.name == name)
    }

    /// All descendants with the given local name, in document order.
    ///
    /// Matching elements are not searched further, so a `p` inside a `p`
    /// (text boxes) is reported once through its outer paragraph.
    pub fn descendants_named(&self, name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        collect_named(self, name, &mut found);
        found
    }

    /// All descendants with the given local name, including nested matches.
    pub fn all_descendants_named(&self, name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        collect_all_named(self, name, &mut found);
        found
    }

    /// Concatenated character data of this element and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        append_text(self, &mut out);
        out
    }
}

fn collect_named<'a>(element: &'a XmlElement, name: &str, found: &mut Vec<&'a XmlElement>) {
    for child in element.elements() {
        if child.name == name {
            found.push(child);
        } else {
            collect_named(child, name, found);
        }
    }
}

fn collect_all_named<'a>(element: &'a XmlElement, name: &str, found: &mut Vec<&'a XmlElement>) {
    for child in element.elements() {
        if child.name == name {
            found.push(child);
        }
        collect_all_named(child, name, found);
    }
}

fn append_text(element: &XmlElement, out: &mut String) {
    for node in &element.children {
        match node {
            XmlNode::Text(text) => out.push_str(text),
            XmlNode::Element(child) => append_text(child, out),
        }
    }
}

/// Elements dropped with their content.
///
/// `mc:Fallback` repeats the content of the preceding `mc:Choice`; keeping
/// both would extract every text box twice. `m:oMath` and `m:oMathPara`
/// carry equation runs that are not document text.
pub const SKIPPED_SUBTREES: [&str; 3] = ["Fallback", "oMath", "oMathPara"];

/// Deepest element nesting accepted before a part is rejected.
pub const MAX_DEPTH: usize = 256;

fn is_skipped(start: &BytesStart<'_>) -> bool {
    let local = start.local_name();
    SKIPPED_SUBTREES
        .iter()
        .any(|name| name.as_bytes() == local.as_ref())
}

/// Parse one XML part into its root element.
pub fn parse(part: &str, xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    // Synthetic holder for the root element.
    let mut stack: Vec<XmlElement> = vec![XmlElement::default()];

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if is_skipped(&start) {
                    let end = start.name().as_ref().to_vec();
                    if let Err(error) = reader.read_to_end(QName(&end)) {
                        return Err(OoxmlError::xml(
                            part,
                            format!("{error} at byte {}", reader.error_position()),
                        ));
                    }
                    continue;
                }
                // The holder frame does not count towards the depth.
                if stack.len() > MAX_DEPTH {
                    return Err(OoxmlError::xml(part, "element nesting too deep"));
                }
                stack.push(element_from(part, &start)?);
            }
            Ok(Event::Empty(start)) if is_skipped(&start) => {}
            Ok(Event::Empty(start)) => {
                let element = element_from(part, &start)?;
                push_node(&mut stack, XmlNode::Element(element));
            }
            Ok(Event::End(_)) => {
                if stack.len() < 2 {
                    return Err(OoxmlError::xml(part, "unexpected closing tag"));
                }
                if let Some(element) = stack.pop() {
                    push_node(&mut stack, XmlNode::Element(element));
                }
            }
            Ok(Event::Text(text)) => {
                push_text(&mut stack, &String::from_utf8_lossy(&text));
            }
            Ok(Event::CData(data)) => {
                push_text(&mut stack, &String::from_utf8_lossy(&data));
            }
            Ok(Event::GeneralRef(reference)) => {
                let name = String::from_utf8_lossy(&reference);
                match resolve_entity(&name) {
                    Some(ch) => push_text(&mut stack, ch.encode_utf8(&mut [0u8; 4])),
                    None => {
                        return Err(OoxmlError::xml(
                            part,
                            format!("unknown entity reference &{name};"),
                        ));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(error) => {
                return Err(OoxmlError::xml(
                    part,
                    format!("{error} at byte {}", reader.error_position()),
                ));
            }
        }
    }

    if stack.len() != 1 {
        return Err(OoxmlError::xml(part, "unclosed element at end of input"));
    }
    stack
        .pop()
        .and_then(|holder| {
            holder.children.into_iter().find_map(|node| match node {
                XmlNode::Element(element) => Some(element),
                XmlNode::Text(_) => None,
            })
        })
        .ok_or_else(|| OoxmlError::xml(part, "no root element"))
}

fn element_from(part: &str, start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|error| OoxmlError::xml(part, error))?;
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attribute.value).into_owned();
        let value = match quick_xml::escape::unescape(&raw) {
            Ok(value) => value.into_owned(),
            Err(_) => raw,
        };
        attributes.push((key, value));
    }
    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn push_node(stack: &mut [XmlElement], node: XmlNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn push_text(stack: &mut [XmlElement], text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        if let Some(XmlNode::Text(existing)) = parent.children.last_mut() {
            existing.push_str(text);
        } else {
            parent.children.push(XmlNode::Text(text.to_string()));
        }
    }
}

fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefixes_and_keeps_text() {
        let root = parse(
            "test",
            r#"<w:document xmlns:w="ns"><w:body><w:p><w:r><w:t xml:space="preserve">A &amp; B</w:t></w:r></w:p></w:body></w:document>"#,
        )
        .unwrap();
        assert_eq!(root.name, "document");
        let runs = root.descendants_named("t");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text(), "A & B");
        assert_eq!(runs[0].attr("space"), Some("preserve"));
    }

    #[test]
    fn resolves_character_references() {
        let root = parse("test", "<a>&#65;&#x42;</a>").unwrap();
        assert_eq!(root.text(), "AB");
    }

    #[test]
    fn rejects_unclosed_elements() {
        let error = parse("word/document.xml", "<a><b></a>").unwrap_err();
        assert!(matches!(error, OoxmlError::Xml { .. }));
    }

    #[test]
    fn fallback_content_is_dropped() {
        let root = parse(
            "test",
            r#"<w:p xmlns:w="w" xmlns:mc="mc"><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:tbl/></mc:Choice><mc:Fallback><w:tbl/><mc:Fallback/></mc:Fallback></mc:AlternateContent></w:r></w:p>"#,
        )
        .unwrap();
        assert_eq!(root.all_descendants_named("tbl").len(), 1);
        assert!(root.all_descendants_named("Fallback").is_empty());
    }

    #[test]
    fn math_runs_are_not_text() {
        let root = parse(
            "test",
            "<p><r><t>Rate </t></r><oMath><r><t>x+1</t></r></oMath><oMathPara/></p>",
        )
        .unwrap();
        assert_eq!(root.descendants_named("r").len(), 1);
        assert_eq!(root.text(), "Rate ");
    }

    #[test]
    fn nesting_is_capped() {
        let within = format!("{}{}", "<a>".repeat(MAX_DEPTH), "</a>".repeat(MAX_DEPTH));
        assert!(parse("test", &within).is_ok());

        let deep = format!("{}{}", "<a>".repeat(MAX_DEPTH + 1), "</a>".repeat(MAX_DEPTH + 1));
        match parse("word/document.xml", &deep).unwrap_err() {
            OoxmlError::Xml { message, .. } => assert_eq!(message, "element nesting too deep"),
            other => panic!("expected XML error, got {other:?}"),
        }
    }

    #[test]
    fn nested_matches_are_reported_once() {
        let root = parse("test", "<a><p><x><p/></x></p><p/></a>").unwrap();
        assert_eq!(root.descendants_named("p").len(), 2);
        assert_eq!(root.all_descendants_named("p").len(), 3);
    }
}
