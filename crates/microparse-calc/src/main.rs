//! Command-line entrypoint for the microparse calculator.
//!
//! The binary delegates to [`microparse_calc::run`], which parses arguments,
//! installs telemetry and evaluates either `--expr` or lines from stdin.

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    microparse_calc::run(std::env::args_os(), stdin, &mut stdout, &mut stderr)
}
