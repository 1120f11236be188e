//! Tests for argument parsing.

use clap::Parser;

use crate::cli::Cli;
use crate::telemetry::LogFormat;

#[test]
fn defaults_apply_without_flags() {
    let cli = Cli::try_parse_from(["microparse-calc"]).expect("parse");
    assert_eq!(cli.expr, None);
    assert_eq!(cli.max_args, 10);
    assert_eq!(cli.log_filter, "warn");
    assert_eq!(cli.log_format, LogFormat::Compact);
}

#[test]
fn flags_override_defaults() {
    let cli = Cli::try_parse_from([
        "microparse-calc",
        "--expr",
        "1 + 2",
        "--max-args",
        "3",
        "--log-filter",
        "microparse=debug",
        "--log-format",
        "JSON",
    ])
    .expect("parse");
    assert_eq!(cli.expr.as_deref(), Some("1 + 2"));
    assert_eq!(cli.max_args, 3);
    assert_eq!(cli.log_filter, "microparse=debug");
    assert_eq!(cli.log_format, LogFormat::Json);
}

#[test]
fn unknown_log_format_is_rejected() {
    assert!(Cli::try_parse_from(["microparse-calc", "--log-format", "xml"]).is_err());
}
