//! Validation context: failure policy, location stack and collected verdicts.

use std::fmt::Display;
use std::ops::{Deref, DerefMut};

use tfcu_model::{
    AuditResults, Category, ErrorKind, Severity, ValidationError, ValidationResult, Verdict,
};

/// What happens when a check fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Return the first error-severity failure to the caller.
    Strict,
    /// Collect every failure and log it at `warn` as it happens.
    Lenient,
    /// Collect every failure silently.
    #[default]
    ReportOnly,
}

/// Identity and observed values of one rule evaluation.
#[derive(Debug, Clone)]
pub struct RuleCheck {
    pub category: Category,
    pub rule_id: String,
    pub description: String,
    pub actual: String,
    pub expected: String,
    pub spec_ref: Option<&'static str>,
}

impl RuleCheck {
    pub fn new(
        category: Category,
        rule_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category,
            rule_id: rule_id.into(),
            description: description.into(),
            actual: String::new(),
            expected: String::new(),
            spec_ref: None,
        }
    }

    #[must_use]
    pub fn values(mut self, actual: impl Display, expected: impl Display) -> Self {
        self.actual = actual.to_string();
        self.expected = expected.to_string();
        self
    }

    /// Catalog entry (e.g. `L01`) this check enforces.
    #[must_use]
    pub fn spec_ref(mut self, id: &'static str) -> Self {
        self.spec_ref = Some(id);
        self
    }

    fn into_result(self, verdict: Verdict) -> ValidationResult {
        ValidationResult {
            rule_id: self.rule_id,
            category: self.category,
            description: self.description,
            actual: self.actual,
            expected: self.expected,
            verdict,
            spec_ref: self.spec_ref.map(str::to_string),
        }
    }
}

/// Accumulates verdicts for one audit or one generation pass.
#[derive(Debug, Default)]
pub struct ValidationContext {
    mode: ValidationMode,
    location: Vec<String>,
    results: Vec<ValidationResult>,
}

impl ValidationContext {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            location: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Enter a nested element. The frame is popped when the guard drops,
    /// including on early return through `?`.
    pub fn scope(&mut self, frame: impl Into<String>) -> LocationScope<'_> {
        self.location.push(frame.into());
        LocationScope { context: self }
    }

    /// Current location, frames joined by `/`.
    pub fn location(&self) -> String {
        self.location.join("/")
    }

    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    /// Recorded failures and warnings, in evaluation order.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.results.iter().filter_map(ValidationResult::error)
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|result| result.verdict.is_fail())
    }

    pub fn pass(&mut self, check: RuleCheck) {
        self.results.push(check.into_result(Verdict::Pass));
    }

    /// Record a failure. Only [`ValidationMode::Strict`] turns it into `Err`.
    pub fn fail(
        &mut self,
        check: RuleCheck,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let error = self.error_for(&check, kind, message.into(), Severity::Error);
        self.log(&error);
        self.results
            .push(check.into_result(Verdict::Fail(error.clone())));
        match self.mode {
            ValidationMode::Strict => Err(error),
            ValidationMode::Lenient | ValidationMode::ReportOnly => Ok(()),
        }
    }

    /// Record a warning. Warnings never interrupt, whatever the mode.
    pub fn warn(&mut self, check: RuleCheck, kind: ErrorKind, message: impl Into<String>) {
        let error = self.error_for(&check, kind, message.into(), Severity::Warning);
        self.log(&error);
        self.results.push(check.into_result(Verdict::Warning(error)));
    }

    /// Pass when `ok`, otherwise fail with `message`.
    pub fn verdict(
        &mut self,
        ok: bool,
        check: RuleCheck,
        kind: ErrorKind,
        message: impl FnOnce() -> String,
    ) -> Result<(), ValidationError> {
        if ok {
            self.pass(check);
            Ok(())
        } else {
            self.fail(check, kind, message())
        }
    }

    pub fn finish(self) -> AuditResults {
        AuditResults::from_results(self.results)
    }

    fn error_for(
        &self,
        check: &RuleCheck,
        kind: ErrorKind,
        message: String,
        severity: Severity,
    ) -> ValidationError {
        ValidationError::new(kind, check.rule_id.clone(), message)
            .with_severity(severity)
            .with_location(self.location())
            .with_values(check.actual.clone(), check.expected.clone())
    }

    fn log(&self, error: &ValidationError) {
        if self.mode == ValidationMode::Lenient {
            tracing::warn!(
                rule = %error.rule,
                location = %error.location,
                severity = ?error.severity,
                "{}",
                error.message
            );
        }
    }
}

/// Guard returned by [`ValidationContext::scope`].
pub struct LocationScope<'a> {
    context: &'a mut ValidationContext,
}

impl Deref for LocationScope<'_> {
    type Target = ValidationContext;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl DerefMut for LocationScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl Drop for LocationScope<'_> {
    fn drop(&mut self) {
        self.context.location.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(rule: &str) -> RuleCheck {
        RuleCheck::new(Category::Tables, rule, "test").values("a", "b")
    }

    #[test]
    fn scopes_nest_and_unwind() {
        let mut ctx = ValidationContext::new(ValidationMode::ReportOnly);
        {
            let mut table = ctx.scope("table[2]");
            {
                let row = table.scope("row[1]");
                assert_eq!(row.location(), "table[2]/row[1]");
            }
            assert_eq!(table.location(), "table[2]");
        }
        assert_eq!(ctx.location(), "");
    }

    #[test]
    fn scope_unwinds_on_early_return() {
        fn failing(ctx: &mut ValidationContext) -> Result<(), ValidationError> {
            let mut scoped = ctx.scope("callout[0]");
            scoped.fail(check("CAL-0-FILL"), ErrorKind::Callout, "bad fill")?;
            Ok(())
        }

        let mut ctx = ValidationContext::new(ValidationMode::Strict);
        let error = failing(&mut ctx).unwrap_err();
        assert_eq!(error.location, "callout[0]");
        assert_eq!(ctx.location(), "");
    }

    #[test]
    fn report_only_collects_every_failure() {
        let mut ctx = ValidationContext::new(ValidationMode::ReportOnly);
        ctx.fail(check("A"), ErrorKind::Table, "one").unwrap();
        ctx.fail(check("B"), ErrorKind::Table, "two").unwrap();
        ctx.warn(check("C"), ErrorKind::Table, "three");
        ctx.pass(check("D"));
        let results = ctx.finish();
        assert_eq!(results.failed().len(), 2);
        assert_eq!(results.warnings().len(), 1);
        assert_eq!(results.passed().len(), 1);
    }

    #[test]
    fn strict_mode_does_not_stop_on_warnings() {
        let mut ctx = ValidationContext::new(ValidationMode::Strict);
        ctx.warn(check("W"), ErrorKind::Structure, "soft");
        assert!(!ctx.has_failures());
        assert!(ctx.fail(check("F"), ErrorKind::Table, "hard").is_err());
        assert!(ctx.has_failures());
    }
}
