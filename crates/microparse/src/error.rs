//! Error types for registration, matching and parse unwinding.
//!
//! Ordinary no-matches are not errors: they are reported through
//! [`MatchOutcome`](crate::MatchOutcome) and the `accept` family. A
//! [`ParseError`] always means the active parse must unwind to the nearest
//! recovery point. [`IntegrityError`] marks programming errors that no
//! recovery point absorbs.

use thiserror::Error;

use crate::diagnostic::Diagnostic;

/// Errors raised while registering user-defined terminals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// The catalog already holds its maximum number of terminals.
    #[error("terminal catalog is full ({capacity} user terminals)")]
    CatalogFull {
        /// The configured catalog capacity.
        capacity: usize,
    },

    /// A terminal with the same name was registered earlier.
    #[error("terminal {name} is already registered")]
    DuplicateName {
        /// The rejected name.
        name: String,
    },

    /// Terminal names must not be empty.
    #[error("terminal name must not be empty")]
    EmptyName,
}

/// Programming errors detected while matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IntegrityError {
    /// A user terminal handle was presented to a registry that did not
    /// issue it.
    #[error("terminal handle #{index} does not belong to this registry")]
    UnknownHandle {
        /// Catalog index carried by the handle.
        index: usize,
    },

    /// A matcher call offered more terminals than the capture buffer holds.
    #[error("{count} terminals offered but the capture buffer holds {capacity}")]
    TooManyTerminals {
        /// Number of terminals offered.
        count: usize,
        /// Capture buffer capacity.
        capacity: usize,
    },

    /// A user scanner reported more input than it was given, or a length
    /// that splits a character.
    #[error("scanner for {name} consumed {consumed} bytes of {available}")]
    ScannerOverrun {
        /// Name of the offending terminal.
        name: String,
        /// Length reported by the scanner.
        consumed: usize,
        /// Bytes remaining in the line.
        available: usize,
    },
}

/// A condition that unwinds the active parse.
///
/// # Example
///
/// ```
/// use microparse::ParseError;
///
/// let err = ParseError::raised("undefined function foo");
/// assert_eq!(err.to_string(), "undefined function foo");
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A strict call form found none of the expected terminals.
    #[error("{0}")]
    Expected(Diagnostic),

    /// A quoted string reached the end of the line without a closing quote.
    #[error("unterminated string at position {column}")]
    UnterminatedString {
        /// One-based column of the opening quote.
        column: usize,
    },

    /// An integer literal exceeded `i64::MAX`.
    #[error("integer overflow at position {column}")]
    IntegerOverflow {
        /// One-based column of the first digit.
        column: usize,
    },

    /// An error raised by grammar code or a user scanner.
    #[error("{message}")]
    Raised {
        /// The formatted message.
        message: String,
    },

    /// A programming error; never absorbed by a recovery point.
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}

impl ParseError {
    /// Creates a raised error carrying `message`.
    #[must_use]
    pub fn raised(message: impl Into<String>) -> Self {
        Self::Raised {
            message: message.into(),
        }
    }

    /// Returns `false` for integrity violations.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Integrity(_))
    }
}
