//! End-to-end audits through the `tfcu` binary and the command functions.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tfcu_cli::cli::{AuditArgs, ReportFormatArg};
use tfcu_cli::commands::run_audit;
use tfcu_cli::types::{EXIT_FAILURES, EXIT_FATAL, EXIT_OK};

const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn cell(fill: &str, run: &str) -> String {
    format!(r#"<w:tc><w:tcPr><w:shd w:val="clear" w:fill="{fill}"/></w:tcPr><w:p>{run}</w:p></w:tc>"#)
}

fn run(text: &str, size: u32, color: &str, bold: bool) -> String {
    let bold = if bold { "<w:b/>" } else { "" };
    format!(
        r#"<w:r><w:rPr><w:rFonts w:ascii="Calibri"/>{bold}<w:color w:val="{color}"/><w:sz w:val="{size}"/></w:rPr><w:t xml:space="preserve">{text}</w:t></w:r>"#
    )
}

fn plain_cell(text: &str) -> String {
    format!("<w:tc><w:p>{}</w:p></w:tc>", run(text, 20, "000000", false))
}

fn paragraph(text: &str) -> String {
    format!("<w:p>{}</w:p>", run(text, 22, "000000", false))
}

fn document_xml(margin: u32) -> String {
    let header = format!(
        "<w:tbl><w:tr>{}</w:tr><w:tr>{}</w:tr></w:tbl>",
        cell("154747", &run("Loan Payoff Request", 32, "FFFFFF", true)),
        cell(
            "E8F4F4",
            &run("Department: Lending  |  Date Updated: 01/15/2025", 20, "000000", false)
        ),
    );
    let revision = format!(
        "<w:tbl><w:tr>{}{}{}</w:tr><w:tr>{}{}{}</w:tr></w:tbl>",
        plain_cell("Date Updated"),
        plain_cell("Changes Made"),
        plain_cell("Author"),
        plain_cell("01/15/2025"),
        plain_cell("Initial release"),
        plain_cell("J. Smith"),
    );
    let body = [
        header,
        paragraph("OVERVIEW"),
        paragraph("Department: Lending"),
        paragraph("Date Updated: 01/15/2025"),
        paragraph("RELATED"),
        paragraph("Revision History"),
        revision,
    ]
    .concat();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W}"><w:body>{body}<w:sectPr><w:pgMar w:top="{margin}" w:bottom="{margin}" w:left="{margin}" w:right="{margin}"/></w:sectPr></w:body></w:document>"#
    )
}

fn footer_xml() -> String {
    format!(r#"<w:ftr xmlns:w="{W}"><w:p><w:r><w:t>Page 1</w:t></w:r></w:p></w:ftr>"#)
}

fn docx(parts: &[(&str, String)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    for (name, contents) in parts {
        writer.start_file(*name, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn compliant_docx(margin: u32) -> Vec<u8> {
    docx(&[
        ("word/document.xml", document_xml(margin)),
        ("word/footer1.xml", footer_xml()),
    ])
}

fn tfcu(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tfcu"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn audit_args(path: PathBuf, output: Option<PathBuf>) -> AuditArgs {
    AuditArgs {
        path,
        format: ReportFormatArg::Markdown,
        output,
        strict: true,
        verbose: false,
    }
}

#[test]
fn strict_json_audit_of_compliant_document_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        dir.path(),
        "Lending_Loan-Payoff-Request_20250115.docx",
        &compliant_docx(720),
    );
    let output = tfcu(&["audit", path.to_str().unwrap(), "--format", "json", "--strict"]);
    assert_eq!(output.status.code(), Some(EXIT_OK), "{output:?}");

    assert!(output.stdout.ends_with(b"}\n"));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["failed"], 0);
    assert_eq!(report["failed"], serde_json::json!([]));
    assert_eq!(report["metadata"]["specVersion"], "6.0.4");
    assert_eq!(
        report["metadata"]["documentSha256"]
            .as_str()
            .map(str::len),
        Some(64)
    );
}

#[test]
fn strict_audit_with_failures_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "wide.docx", &compliant_docx(1440));
    let output = tfcu(&["audit", path.to_str().unwrap(), "--strict"]);
    assert_eq!(output.status.code(), Some(EXIT_FAILURES));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("LAY-MARGIN-TOP"));
    assert!(stdout.ends_with("\n"));
    assert!(!stdout.ends_with("\n\n"), "{stdout:?}");
}

#[test]
fn failures_without_strict_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "wide.docx", &compliant_docx(1440));
    let output = tfcu(&["audit", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(EXIT_OK));
}

#[test]
fn corrupt_zip_exits_two_without_results() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "corrupt.docx", b"PK\x03\x04 definitely not a zip");
    let output = tfcu(&["audit", path.to_str().unwrap(), "--format", "json"]);
    assert_eq!(output.status.code(), Some(EXIT_FATAL));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error: extract"), "{stderr}");
}

#[test]
fn runaway_nesting_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let depth = 200_000;
    let document = format!(
        r#"<w:document xmlns:w="{W}"><w:body>{}{}</w:body></w:document>"#,
        "<w:p>".repeat(depth),
        "</w:p>".repeat(depth)
    );
    let path = write_fixture(
        dir.path(),
        "deep.docx",
        &docx(&[("word/document.xml", document)]),
    );
    let output = tfcu(&["audit", path.to_str().unwrap(), "--format", "json"]);
    assert_eq!(output.status.code(), Some(EXIT_FATAL));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("element nesting too deep"), "{stderr}");
}

#[test]
fn missing_file_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.docx");
    let output = tfcu(&["audit", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(EXIT_FATAL));
}

#[test]
fn missing_footer_only_warns() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = docx(&[("word/document.xml", document_xml(720))]);
    let path = write_fixture(dir.path(), "no-footer.docx", &bytes);
    let outcome = run_audit(&audit_args(path, None)).unwrap();
    assert_eq!(outcome.summary.failed, 0);
    assert!(outcome.report.content.contains("STR-FOOTER"));
    assert_eq!(outcome.exit_code(), EXIT_OK);
}

#[test]
fn output_flag_writes_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "doc.docx", &compliant_docx(720));
    let report_path = dir.path().join("audit.md");
    let outcome = run_audit(&audit_args(path, Some(report_path.clone()))).unwrap();
    assert_eq!(outcome.output.as_deref(), Some(report_path.as_path()));
    let written = std::fs::read_to_string(&report_path).unwrap();
    assert!(written.starts_with("# TFCU Procedure Audit Report"));
    assert_eq!(written, outcome.report.content);
}

#[test]
fn filename_command_exit_codes() {
    let good = tfcu(&["filename", "Lending_Loan-Payoff-Request_20250115.docx"]);
    assert_eq!(good.status.code(), Some(EXIT_OK));
    let bad = tfcu(&["filename", "loan payoff final v2.docx"]);
    assert_eq!(bad.status.code(), Some(EXIT_FAILURES));
}

#[test]
fn rules_command_lists_catalog() {
    let output = tfcu(&["--color", "never", "rules", "--category", "header-table"]);
    assert_eq!(output.status.code(), Some(EXIT_OK));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("H01"));
    assert!(!stdout.contains("L01"));
}
