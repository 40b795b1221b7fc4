//! Category validators.
//!
//! Each module evaluates one [`Category`](tfcu_model::Category) and records
//! its verdicts on the shared context. Categories are independent: a missing
//! header table or an odd margin never suppresses another category.

pub mod callouts;
pub mod header;
pub mod layout;
pub mod sentences;
pub mod structure;
pub mod tables;
pub mod typography;

use tfcu_model::{ExtractedDocument, ValidationError};

use crate::context::ValidationContext;

/// Run every category validator in report order.
pub fn run_all(
    ctx: &mut ValidationContext,
    document: &ExtractedDocument,
) -> Result<(), ValidationError> {
    layout::check(ctx, document)?;
    header::check(ctx, document)?;
    typography::check(ctx, document)?;
    callouts::check(ctx, document)?;
    tables::check(ctx, document)?;
    structure::check(ctx, document)?;
    sentences::check(ctx, document)?;
    Ok(())
}
