//! Container-level extraction behavior against in-memory `.docx` archives.

use std::io::{Cursor, Write};

use tfcu_ooxml::{OoxmlError, extract_document, extract_from_bytes};

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>OVERVIEW</w:t></w:r></w:p>
    <w:sectPr><w:pgMar w:top="720" w:bottom="720" w:left="720" w:right="720"/></w:sectPr>
  </w:body>
</w:document>"#;

const FOOTER: &str = r#"<w:ftr xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:p><w:r><w:t>Page 1</w:t></w:r></w:p></w:ftr>"#;

fn docx(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    for (name, contents) in parts {
        writer.start_file(*name, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[test]
fn extracts_margins_and_footer() {
    let doc = extract_from_bytes(docx(&[
        ("word/document.xml", DOCUMENT),
        ("word/footer1.xml", FOOTER),
    ]))
    .unwrap();
    let margins = doc.margins.unwrap();
    assert_eq!((margins.top, margins.right), (720, 720));
    let footer = doc.footer.unwrap();
    assert_eq!(footer[0].text, "Page 1");
    assert_eq!(doc.style_defaults, None);
}

#[test]
fn missing_footer_is_not_an_error() {
    let doc = extract_from_bytes(docx(&[("word/document.xml", DOCUMENT)])).unwrap();
    assert!(doc.footer.is_none());
}

#[test]
fn missing_document_part_is_fatal() {
    let error = extract_from_bytes(docx(&[("word/styles.xml", "<w:styles/>")])).unwrap_err();
    assert!(matches!(
        error,
        OoxmlError::MissingPart {
            part: "word/document.xml"
        }
    ));
}

#[test]
fn non_zip_bytes_are_a_container_error() {
    let error = extract_from_bytes(b"this is not a zip archive".to_vec()).unwrap_err();
    assert!(matches!(error, OoxmlError::Container { .. }));
}

#[test]
fn malformed_document_xml_is_fatal() {
    let error = extract_from_bytes(docx(&[(
        "word/document.xml",
        "<w:document><w:body></w:document>",
    )]))
    .unwrap_err();
    match error {
        OoxmlError::Xml { part, .. } => assert_eq!(part, "word/document.xml"),
        other => panic!("expected XML error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let error = extract_document(&dir.path().join("absent.docx")).unwrap_err();
    assert!(matches!(error, OoxmlError::NotFound { .. }));
}

#[test]
fn extraction_from_disk_matches_memory() {
    let bytes = docx(&[("word/document.xml", DOCUMENT)]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Ops_Test-Doc_20250101.docx");
    std::fs::write(&path, &bytes).unwrap();
    assert_eq!(
        extract_document(&path).unwrap(),
        extract_from_bytes(bytes).unwrap()
    );
}

#[test]
fn deeply_nested_document_is_an_xml_error() {
    let depth = 200_000;
    let document = format!(
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}{}</w:body></w:document>"#,
        "<w:p>".repeat(depth),
        "</w:p>".repeat(depth)
    );
    let error = extract_from_bytes(docx(&[("word/document.xml", document.as_str())])).unwrap_err();
    match error {
        OoxmlError::Xml { part, message } => {
            assert_eq!(part, "word/document.xml");
            assert_eq!(message, "element nesting too deep");
        }
        other => panic!("expected XML error, got {other:?}"),
    }
}
