//! Error types for the calculator runtime.

use std::io;

use microparse::{IntegrityError, RegistryError};
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Failures that stop the calculator as a whole.
///
/// Errors in an individual input line are not represented here: they are
/// reported on stderr and evaluation continues with the next line.
#[derive(Debug, Error)]
pub enum AppError {
    /// Command-line arguments could not be parsed.
    #[error("{0}")]
    CliUsage(clap::Error),
    /// Telemetry could not be installed.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    /// The grammar's terminals could not be registered.
    #[error("failed to register calculator terminals: {0}")]
    Registry(#[from] RegistryError),
    /// The engine detected a programming error.
    #[error("parser integrity violation: {0}")]
    Integrity(#[from] IntegrityError),
    /// Reading an input line failed.
    #[error("failed to read input: {0}")]
    ReadInput(io::Error),
    /// Writing a result or message failed.
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}
