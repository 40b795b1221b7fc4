use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use sha2::{Digest, Sha256};
use tracing::{debug, info, info_span};

use tfcu_ooxml::extract_document;
use tfcu_report::{ReportOptions, generate_report};
use tfcu_standards::{RULE_CATALOG, RuleCategory, SPEC_VERSION, rules_in};
use tfcu_validate::{ValidationContext, ValidationMode, validate_document, validate_filename};

use crate::cli::{AuditArgs, FilenameArgs, RulesArgs};
use crate::summary::rules_table;
use crate::types::{AuditOutcome, EXIT_FAILURES, EXIT_OK};

/// Extract, validate and report on one document.
///
/// Any `Err` is fatal: no results exist for the document.
pub fn run_audit(args: &AuditArgs) -> Result<AuditOutcome> {
    let path = &args.path;
    let span = info_span!("audit", path = %path.display());
    let _guard = span.enter();

    let start = Instant::now();
    let document =
        extract_document(path).with_context(|| format!("extract {}", path.display()))?;
    info!(
        paragraphs = document.paragraphs.len(),
        tables = document.tables.len(),
        callouts = document.callouts.len(),
        duration_ms = start.elapsed().as_millis(),
        "extraction complete"
    );

    let results = validate_document(&document);

    let mut options = ReportOptions::new(
        args.format.into(),
        path.display().to_string(),
        SPEC_VERSION,
    );
    options.verbose = args.verbose;
    let digest = file_sha256(path).with_context(|| format!("hash {}", path.display()))?;
    options.document_sha256 = Some(digest);
    let report = generate_report(&results, &options).context("render report")?;

    if let Some(output) = &args.output {
        report.write_to(output)?;
        info!(output = %output.display(), "report written");
    } else {
        // Markdown already ends with a newline; JSON and HTML do not.
        print!("{}", report.content);
        if !report.content.ends_with('\n') {
            println!();
        }
    }

    Ok(AuditOutcome {
        document: path.clone(),
        summary: report.summary,
        categories: results.categories,
        report,
        output: args.output.clone(),
        strict: args.strict,
    })
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let table = match args.category.as_deref() {
        Some(name) => {
            let category = RuleCategory::from_name(name).ok_or_else(|| {
                let known = RuleCategory::ALL.map(RuleCategory::label).join(", ");
                anyhow!("unknown rule category '{name}' (expected one of: {known})")
            })?;
            rules_table(rules_in(category))
        }
        None => rules_table(RULE_CATALOG),
    };
    println!("{table}");
    Ok(())
}

/// Returns the exit code: non-conforming names exit with failures.
pub fn run_filename(args: &FilenameArgs) -> i32 {
    let mut ctx = ValidationContext::new(ValidationMode::Strict);
    match validate_filename(&mut ctx, &args.name) {
        Ok(()) => {
            println!("ok: {}", args.name);
            EXIT_OK
        }
        Err(error) => {
            println!("fail: {}", error.message);
            EXIT_FAILURES
        }
    }
}

/// Hex SHA-256 of a file, read in 8 KiB chunks.
pub fn file_sha256(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let digest = hex::encode(hasher.finalize());
    debug!(sha256 = %digest, "hashed document");
    Ok(digest)
}
