//! CLI argument definitions for the calculator.

use clap::Parser;

use crate::telemetry::LogFormat;

/// Default limit on the number of arguments to a function call.
pub const DEFAULT_MAX_ARGS: usize = 10;

/// Integer calculator over a line-oriented expression grammar.
///
/// Reads one line at a time from stdin and prints ` = N` for every
/// comma-separated expression. Enter `q` or `quit` to stop.
#[derive(Parser, Debug)]
#[command(name = "microparse-calc", version)]
pub(crate) struct Cli {
    /// Evaluates a single line instead of reading stdin.
    #[arg(long, value_name = "LINE")]
    pub(crate) expr: Option<String>,
    /// Maximum number of arguments accepted by a function call.
    #[arg(long, default_value_t = DEFAULT_MAX_ARGS)]
    pub(crate) max_args: usize,
    /// Tracing filter directive (for example `microparse=debug`).
    #[arg(long, default_value = "warn")]
    pub(crate) log_filter: String,
    /// Log output format: `json` or `compact`.
    #[arg(long, default_value_t = LogFormat::Compact)]
    pub(crate) log_format: LogFormat,
}
