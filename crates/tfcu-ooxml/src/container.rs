//! `.docx` ZIP container access.

use std::io::{Cursor, Read};
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{OoxmlError, Result};

/// Main document body. Required.
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Style definitions. Optional.
pub const STYLES_PART: &str = "word/styles.xml";
/// Primary footer. Optional.
pub const FOOTER_PART: &str = "word/footer1.xml";

/// Raw XML of the parts the validator consumes.
#[derive(Debug, Clone)]
pub struct DocxParts {
    pub document: String,
    pub styles: Option<String>,
    pub footer: Option<String>,
}

/// An opened `.docx` archive with named-part lookup.
pub struct DocxContainer {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl DocxContainer {
    /// Read and open a `.docx` from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|error| {
            if error.kind() == std::io::ErrorKind::NotFound {
                OoxmlError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                OoxmlError::Io(error)
            }
        })?;
        Self::from_bytes(bytes)
    }

    /// Open a `.docx` held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|source| OoxmlError::Container { source })?;
        tracing::debug!(entries = archive.len(), "opened docx container");
        Ok(Self { archive })
    }

    /// Names of every entry in the archive.
    pub fn part_names(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    /// Read a part as UTF-8 text, `None` when the archive has no such entry.
    pub fn part(&mut self, name: &str) -> Result<Option<String>> {
        match self.archive.by_name(name) {
            Ok(mut file) => {
                let mut contents = String::new();
                file.read_to_string(&mut contents)
                    .map_err(|source| OoxmlError::ReadPart {
                        part: name.to_string(),
                        source,
                    })?;
                Ok(Some(contents))
            }
            Err(ZipError::FileNotFound) => Ok(None),
            Err(source) => Err(OoxmlError::Container { source }),
        }
    }

    /// Pull out the document, styles and footer parts.
    ///
    /// Only the document part is mandatory; without it nothing can be
    /// validated.
    pub fn into_parts(mut self) -> Result<DocxParts> {
        let document = self
            .part(DOCUMENT_PART)?
            .ok_or(OoxmlError::MissingPart {
                part: DOCUMENT_PART,
            })?;
        let styles = self.part(STYLES_PART)?;
        let footer = self.part(FOOTER_PART)?;
        tracing::debug!(
            has_styles = styles.is_some(),
            has_footer = footer.is_some(),
            "read docx parts"
        );
        Ok(DocxParts {
            document,
            styles,
            footer,
        })
    }
}
