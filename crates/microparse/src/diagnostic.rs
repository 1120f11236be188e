//! Failure messages for strict matcher calls.
//!
//! A [`Diagnostic`] lists what the matcher expected from the failing terminal
//! onward and, when input was consumed before the failure, the column where
//! it stopped. Built-in and registered kinds render as `<name>`; literal text
//! renders in double quotes so the two cannot be confused.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IntegrityError;
use crate::matcher::{FailureRecord, Mode};
use crate::registry::{Resolved, TerminalRegistry};
use crate::terminal::Terminal;

/// A structured "expected ..." message.
///
/// # Example
///
/// ```
/// use microparse::Diagnostic;
///
/// let diag = Diagnostic::new(
///     vec![String::from("<end of line>"), String::from("\",\"")],
///     true,
///     Some(4),
/// );
/// assert_eq!(
///     diag.to_string(),
///     "expected one of: <end of line>, \",\" at position 4"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rendered terminals, from the failing one onward.
    expected: Vec<String>,
    /// Whether the terminals were independent alternatives.
    one_of: bool,
    /// One-based column of the failure, if past the start of the line.
    column: Option<usize>,
}

impl Diagnostic {
    /// Creates a diagnostic from rendered terminal names.
    #[must_use]
    pub const fn new(expected: Vec<String>, one_of: bool, column: Option<usize>) -> Self {
        Self {
            expected,
            one_of,
            column,
        }
    }

    /// Builds the diagnostic for a failed matcher call.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrityError::UnknownHandle`] if a user terminal in
    /// `terminals` does not belong to `registry`.
    pub fn from_failure(
        registry: &TerminalRegistry,
        terminals: &[Terminal],
        mode: Mode,
        failure: &FailureRecord,
    ) -> Result<Self, IntegrityError> {
        let expected = terminals
            .iter()
            .skip(failure.index())
            .map(|terminal| registry.resolve(terminal).map(|r| render(&r)))
            .collect::<Result<Vec<_>, _>>()?;
        let one_of = mode == Mode::Any && terminals.len() > 1;
        let column = (failure.position() > 0).then_some(failure.column());
        Ok(Self::new(expected, one_of, column))
    }

    /// Returns the rendered terminal names.
    #[must_use]
    pub const fn expected(&self) -> &[String] {
        self.expected.as_slice()
    }

    /// Returns `true` when the terminals were alternatives.
    #[must_use]
    pub const fn is_one_of(&self) -> bool {
        self.one_of
    }

    /// Returns the one-based failure column, if any input was consumed.
    #[must_use]
    pub const fn column(&self) -> Option<usize> {
        self.column
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected ")?;
        if self.one_of {
            f.write_str("one of: ")?;
        }
        f.write_str(&self.expected.join(", "))?;
        if let Some(column) = self.column {
            write!(f, " at position {column}")?;
        }
        Ok(())
    }
}

fn render(resolved: &Resolved<'_>) -> String {
    match resolved {
        Resolved::Builtin(name) => format!("<{name}>"),
        Resolved::User(terminal) => format!("<{}>", terminal.name()),
        Resolved::Literal(text) => format!("\"{text}\""),
    }
}

/// Builds the "expected ..." message for a failed matcher call.
///
/// # Errors
///
/// Returns [`IntegrityError::UnknownHandle`] if a user terminal in
/// `terminals` does not belong to `registry`.
pub fn build_message(
    registry: &TerminalRegistry,
    terminals: &[Terminal],
    mode: Mode,
    failure: &FailureRecord,
) -> Result<String, IntegrityError> {
    Diagnostic::from_failure(registry, terminals, mode, failure).map(|d| d.to_string())
}
