//! Fatal extraction errors.
//!
//! Anything in here aborts the audit before a single rule runs; recoverable
//! gaps in document structure are modelled as `None` fields instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OoxmlError {
    /// Input file does not exist.
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    /// The bytes are not a readable ZIP archive.
    #[error("not a valid .docx / corrupt archive: {source}")]
    Container {
        #[source]
        source: zip::result::ZipError,
    },

    /// The archive opened but a required part is absent.
    #[error("missing required document part: {part}")]
    MissingPart { part: &'static str },

    /// A part could not be read out of the archive.
    #[error("failed to read {part}: {source}")]
    ReadPart {
        part: String,
        #[source]
        source: std::io::Error,
    },

    /// A present part is not well-formed XML.
    #[error("malformed XML in {part}: {message}")]
    Xml { part: String, message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for extraction.
pub type Result<T> = std::result::Result<T, OoxmlError>;

impl OoxmlError {
    pub(crate) fn xml(part: &str, message: impl std::fmt::Display) -> Self {
        Self::Xml {
            part: part.to_string(),
            message: message.to_string(),
        }
    }
}
