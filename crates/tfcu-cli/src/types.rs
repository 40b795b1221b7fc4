use std::collections::BTreeMap;
use std::path::PathBuf;

use tfcu_model::{Category, CategoryTally};
use tfcu_report::{Report, ReportSummary};

/// Every check passed, or failures were found outside strict mode.
pub const EXIT_OK: i32 = 0;
/// Strict mode and at least one check failed.
pub const EXIT_FAILURES: i32 = 1;
/// The audit could not run: unreadable file, bad container, bad XML.
pub const EXIT_FATAL: i32 = 2;

#[derive(Debug)]
pub struct AuditOutcome {
    pub document: PathBuf,
    pub summary: ReportSummary,
    pub categories: BTreeMap<Category, CategoryTally>,
    pub report: Report,
    /// Where the report was written; `None` when it went to stdout.
    pub output: Option<PathBuf>,
    pub strict: bool,
}

impl AuditOutcome {
    pub fn exit_code(&self) -> i32 {
        if self.strict && self.summary.failed > 0 {
            EXIT_FAILURES
        } else {
            EXIT_OK
        }
    }
}
