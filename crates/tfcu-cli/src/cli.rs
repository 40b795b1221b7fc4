//! CLI argument definitions for the procedure auditor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use colorchoice_clap::Color;
use tfcu_report::ReportFormat;

#[derive(Parser)]
#[command(
    name = "tfcu",
    version,
    about = "TFCU procedure auditor - Check .docx procedures against the format rules",
    long_about = "Audit TFCU procedure documents against the procedure format rules.\n\n\
                  Reports layout, header table, typography, callout, table and\n\
                  structure verdicts as JSON, Markdown or HTML."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides `RUST_LOG`).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Audit a .docx procedure and print or write a report.
    Audit(AuditArgs),

    /// List the procedure format rules.
    Rules(RulesArgs),

    /// Check a filename against the naming convention.
    Filename(FilenameArgs),
}

#[derive(Parser)]
pub struct AuditArgs {
    /// Path to the .docx procedure.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "markdown")]
    pub format: ReportFormatArg,

    /// Write the report to a file and print a summary table instead.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Exit with status 1 when any check fails.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Include passed checks in Markdown and HTML reports.
    #[arg(long = "verbose")]
    pub verbose: bool,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Only list one category (e.g. `colors`, `header-table`).
    #[arg(long = "category", value_name = "CATEGORY")]
    pub category: Option<String>,
}

#[derive(Parser)]
pub struct FilenameArgs {
    /// Filename to check, e.g. `Lending_Loan-Payoff-Request_20250115.docx`.
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Json,
    Markdown,
    Html,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Json => ReportFormat::Json,
            ReportFormatArg::Markdown => ReportFormat::Markdown,
            ReportFormatArg::Html => ReportFormat::Html,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
