//! Per-rule verdicts and the aggregated audit result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Severity, ValidationError};

/// Category validator that produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Layout,
    HeaderTable,
    Typography,
    Callouts,
    Tables,
    Structure,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Layout,
        Category::HeaderTable,
        Category::Typography,
        Category::Callouts,
        Category::Tables,
        Category::Structure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Layout => "layout",
            Category::HeaderTable => "headerTable",
            Category::Typography => "typography",
            Category::Callouts => "callouts",
            Category::Tables => "tables",
            Category::Structure => "structure",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Layout => "Layout",
            Category::HeaderTable => "Header Table",
            Category::Typography => "Typography",
            Category::Callouts => "Callouts",
            Category::Tables => "Tables",
            Category::Structure => "Structure",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "error", rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail(ValidationError),
    Warning(ValidationError),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Verdict::Fail(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Verdict::Warning(_))
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Verdict::Pass => None,
            Verdict::Fail(error) | Verdict::Warning(error) => Some(error),
        }
    }

    /// Wrap an error in the verdict matching its severity.
    pub fn from_error(error: ValidationError) -> Self {
        match error.severity {
            Severity::Error => Verdict::Fail(error),
            Severity::Warning => Verdict::Warning(error),
        }
    }
}

/// One verdict plus the values it was decided on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub rule_id: String,
    pub category: Category,
    pub description: String,
    pub actual: String,
    pub expected: String,
    pub verdict: Verdict,
    /// Rule catalog entry this check enforces (e.g. `L01`).
    pub spec_ref: Option<String>,
}

impl ValidationResult {
    pub fn passed(&self) -> bool {
        self.verdict.is_pass()
    }

    pub fn warning(&self) -> bool {
        self.verdict.is_warning()
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.verdict.error()
    }
}

/// Pass/fail/warning counts for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
}

impl CategoryTally {
    pub fn record(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::Pass => self.passed += 1,
            Verdict::Fail(_) => self.failed += 1,
            Verdict::Warning(_) => self.warnings += 1,
        }
    }
}

/// All verdicts of one audit, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResults {
    pub results: Vec<ValidationResult>,
    pub categories: BTreeMap<Category, CategoryTally>,
}

impl AuditResults {
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        let mut categories: BTreeMap<Category, CategoryTally> = BTreeMap::new();
        for result in &results {
            categories
                .entry(result.category)
                .or_default()
                .record(&result.verdict);
        }
        Self {
            results,
            categories,
        }
    }

    pub fn passed(&self) -> Vec<&ValidationResult> {
        self.results.iter().filter(|r| r.verdict.is_pass()).collect()
    }

    pub fn failed(&self) -> Vec<&ValidationResult> {
        self.results.iter().filter(|r| r.verdict.is_fail()).collect()
    }

    pub fn warnings(&self) -> Vec<&ValidationResult> {
        self.results
            .iter()
            .filter(|r| r.verdict.is_warning())
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.verdict.is_fail())
    }
}
