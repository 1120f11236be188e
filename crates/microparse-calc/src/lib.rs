//! Integer calculator built on the `microparse` engine.
//!
//! The crate drives a small expression grammar (see [`grammar`]) over input
//! lines, printing ` = N` for each comma-separated expression. Each line is
//! one recoverable unit of work: a failing line prints its message to stderr
//! and evaluation carries on with the next line.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};

mod cli;
mod error;
mod functions;
pub mod grammar;
mod session;
pub mod telemetry;
mod variables;

use cli::Cli;
pub use cli::DEFAULT_MAX_ARGS;
pub use error::AppError;
pub use functions::{Builtin, RND_MAX};
pub use session::{LineReport, Session};
pub use variables::{ProcessEnvironment, Variables};

/// Runs the calculator with the provided arguments and IO handles.
///
/// Returns success when every evaluated line succeeded.
#[must_use]
pub fn run<I, R, W, E>(args: I, input: R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
{
    let result = match Cli::try_parse_from(args) {
        Ok(cli) => execute(&cli, input, stdout, stderr),
        Err(error) => Err(AppError::CliUsage(error)),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        // Help and version requests arrive as clap errors but are not failures.
        Err(AppError::CliUsage(error)) if !error.use_stderr() => {
            if let Err(write_error) = write!(stdout, "{}", error.render()) {
                warn!(%write_error, "failed to write help output");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            if let Err(write_error) = writeln!(stderr, "{error}") {
                warn!(%write_error, %error, "failed to report error");
            }
            ExitCode::FAILURE
        }
    }
}

fn execute<R, W, E>(cli: &Cli, mut input: R, stdout: &mut W, stderr: &mut E) -> Result<bool, AppError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    telemetry::initialise(&cli.log_filter, cli.log_format)?;
    let environment = ProcessEnvironment;
    let mut session = Session::new(&environment, cli.max_args)?;

    if let Some(line) = &cli.expr {
        let report = session.evaluate(line)?;
        emit(&report, stdout, stderr)?;
        return Ok(report.error().is_none());
    }

    let mut clean = true;
    let mut buffer = Vec::new();
    let mut number = 0_usize;
    loop {
        buffer.clear();
        if input
            .read_until(b'\n', &mut buffer)
            .map_err(AppError::ReadInput)?
            == 0
        {
            break;
        }
        number = number.saturating_add(1);
        // Lines decode one at a time so a bad line only fails itself.
        let Ok(text) = std::str::from_utf8(&buffer) else {
            warn!(line = number, "skipping line with invalid UTF-8");
            writeln!(stderr, "invalid UTF-8 on line {number}").map_err(AppError::WriteOutput)?;
            clean = false;
            continue;
        };
        let report = session.evaluate(text.trim_end_matches(['\n', '\r']))?;
        emit(&report, stdout, stderr)?;
        clean &= report.error().is_none();
        if report.is_quit() {
            debug!("quit requested");
            break;
        }
    }
    Ok(clean)
}

fn emit<W: Write, E: Write>(
    report: &LineReport,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<(), AppError> {
    for value in report.values() {
        writeln!(stdout, " = {value}").map_err(AppError::WriteOutput)?;
    }
    if let Some(message) = report.error() {
        writeln!(stderr, "{message}").map_err(AppError::WriteOutput)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
