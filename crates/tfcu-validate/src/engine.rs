//! Audit entry points.

use std::time::Instant;

use tfcu_model::{AuditResults, ExtractedDocument, ValidationError};

use crate::checks;
use crate::context::{ValidationContext, ValidationMode};

/// Evaluate every rule against an extracted document.
///
/// Pure: the same document always yields equal results.
pub fn validate_document(document: &ExtractedDocument) -> AuditResults {
    let mut ctx = ValidationContext::new(ValidationMode::ReportOnly);
    if let Err(error) = validate_with(&mut ctx, document) {
        // Report-only contexts never short-circuit.
        tracing::error!(rule = %error.rule, "audit stopped early: {error}");
    }
    ctx.finish()
}

/// Evaluate every rule on a caller-provided context.
///
/// In [`ValidationMode::Strict`] the first failure is returned and the
/// remaining rules are not evaluated.
pub fn validate_with(
    ctx: &mut ValidationContext,
    document: &ExtractedDocument,
) -> Result<(), ValidationError> {
    let span = tracing::info_span!("validate", mode = ?ctx.mode());
    let _guard = span.enter();
    let start = Instant::now();

    let outcome = checks::run_all(ctx, document);

    let results = ctx.results();
    tracing::info!(
        rules = results.len(),
        failed = results.iter().filter(|result| result.verdict.is_fail()).count(),
        warnings = results.iter().filter(|result| result.warning()).count(),
        duration_ms = start.elapsed().as_millis(),
        "validation complete"
    );
    outcome
}
