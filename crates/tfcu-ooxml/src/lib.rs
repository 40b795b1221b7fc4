//! DOCX extraction for the procedure validator.
//!
//! Opens the ZIP container, parses the document, styles and footer parts and
//! normalizes them into a [`tfcu_model::ExtractedDocument`]. Every failure in
//! here is fatal to an audit; see [`OoxmlError`].

#![deny(unsafe_code)]

pub mod classify;
pub mod container;
pub mod error;
pub mod normalize;
pub mod xml;

use std::path::Path;

use tfcu_model::ExtractedDocument;

pub use classify::{classify_callout, header_table_candidate};
pub use container::{DOCUMENT_PART, DocxContainer, DocxParts, FOOTER_PART, STYLES_PART};
pub use error::{OoxmlError, Result};

/// Extract the normalized property tree of a `.docx` on disk.
pub fn extract_document(path: &Path) -> Result<ExtractedDocument> {
    let span = tracing::info_span!("extract", path = %path.display());
    let _guard = span.enter();
    let parts = DocxContainer::open(path)?.into_parts()?;
    extract_parts(&parts)
}

/// Extract the normalized property tree of an in-memory `.docx`.
pub fn extract_from_bytes(bytes: Vec<u8>) -> Result<ExtractedDocument> {
    let parts = DocxContainer::from_bytes(bytes)?.into_parts()?;
    extract_parts(&parts)
}

/// Parse and normalize already-read parts.
pub fn extract_parts(parts: &DocxParts) -> Result<ExtractedDocument> {
    let document = xml::parse(DOCUMENT_PART, &parts.document)?;
    let styles = parts
        .styles
        .as_deref()
        .map(|styles| xml::parse(STYLES_PART, styles))
        .transpose()?;
    let footer = parts
        .footer
        .as_deref()
        .map(|footer| xml::parse(FOOTER_PART, footer))
        .transpose()?;
    Ok(normalize::normalize(
        &document,
        styles.as_ref(),
        footer.as_ref(),
    ))
}
