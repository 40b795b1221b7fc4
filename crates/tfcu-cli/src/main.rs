//! TFCU procedure auditor CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tfcu_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use tfcu_cli::commands::{run_audit, run_filename, run_rules};
use tfcu_cli::logging::{LogConfig, LogFormat, init_logging};
use tfcu_cli::summary::print_summary;
use tfcu_cli::types::{EXIT_FATAL, EXIT_OK};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_FATAL);
    }
    let exit_code = match cli.command {
        Command::Audit(args) => match run_audit(&args) {
            Ok(outcome) => {
                if outcome.output.is_some() {
                    print_summary(&outcome);
                }
                outcome.exit_code()
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                EXIT_FATAL
            }
        },
        Command::Rules(args) => match run_rules(&args) {
            Ok(()) => EXIT_OK,
            Err(error) => {
                eprintln!("error: {error}");
                EXIT_FATAL
            }
        },
        Command::Filename(args) => run_filename(&args),
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        use_env_filter: cli.log_level.is_none(),
        ..LogConfig::default()
    };
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
