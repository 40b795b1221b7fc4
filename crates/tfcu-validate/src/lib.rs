//! Rule engine for TFCU procedure documents.
//!
//! [`validate_document`] audits an extracted document against the rule
//! table and returns every verdict. The [`builders`] module offers the same
//! rules at generation time, where a [`ValidationMode`] decides whether a
//! violation stops the caller.

#![deny(unsafe_code)]

pub mod builders;
pub mod checks;
pub mod classify;
pub mod context;
pub mod engine;

pub use builders::{
    RevisionEntry, build_callout, build_header_table, build_revision_table, validate_filename,
};
pub use classify::{TableKind, classify_table};
pub use context::{LocationScope, RuleCheck, ValidationContext, ValidationMode};
pub use engine::{validate_document, validate_with};
