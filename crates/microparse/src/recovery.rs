//! Recovery points for unwinding a failed unit of work.
//!
//! Grammar functions return `Result<_, ParseError>` and propagate failures
//! with `?`, so a raised error skips every normal return between the point
//! of failure and the nearest [`Parser::recover`] call. That call is the
//! recovery point: it records the error as the session's last message and
//! lets the caller move on to the next unit (typically the next line).
//!
//! Recovery points nest: an inner `recover` absorbs errors raised inside it
//! and leaves the outer one untouched. Integrity violations are never
//! absorbed.

use tracing::{debug, warn};

use crate::error::{IntegrityError, ParseError};
use crate::parser::Parser;

/// Returns early with [`ParseError::Raised`] built from a format string.
///
/// The error is converted with `Into`, so the macro also works in
/// functions whose error type implements `From<ParseError>`.
///
/// # Example
///
/// ```
/// use microparse::{ParseError, raise};
///
/// fn lookup(name: &str) -> Result<i64, ParseError> {
///     if name == "x" {
///         return Ok(1);
///     }
///     raise!("{name} not found in environment");
/// }
///
/// assert_eq!(
///     lookup("y").unwrap_err().to_string(),
///     "y not found in environment"
/// );
/// ```
#[macro_export]
macro_rules! raise {
    ($($arg:tt)*) => {
        return ::core::result::Result::Err(
            $crate::ParseError::raised(::std::format!($($arg)*)).into(),
        )
    };
}

impl Parser<'_, '_> {
    /// Runs `unit` as one recoverable unit of work.
    ///
    /// Returns `Ok(Some(value))` when `unit` succeeds and `Ok(None)` when it
    /// raised a recoverable error; the error is then available from
    /// [`last_error`](Self::last_error) and
    /// [`last_message`](Self::last_message).
    ///
    /// # Errors
    ///
    /// Integrity violations escape the recovery point as an
    /// [`IntegrityError`].
    ///
    /// # Example
    ///
    /// ```
    /// use microparse::{Parser, Terminal, TerminalRegistry};
    ///
    /// let registry = TerminalRegistry::new();
    /// let mut parser = Parser::new(&registry, "x[5");
    /// let outcome = parser.recover(|p| {
    ///     p.expect_all(&[Terminal::Identifier, "[".into(), Terminal::Integer, "]".into()])
    /// })?;
    /// assert!(outcome.is_none());
    /// assert_eq!(parser.last_message(), Some("expected \"]\" at position 4"));
    /// # Ok::<(), microparse::IntegrityError>(())
    /// ```
    pub fn recover<T, F>(&mut self, unit: F) -> Result<Option<T>, IntegrityError>
    where
        F: FnOnce(&mut Self) -> Result<T, ParseError>,
    {
        match unit(self) {
            Ok(value) => Ok(Some(value)),
            Err(ParseError::Integrity(error)) => {
                warn!(%error, "integrity violation passed through recovery point");
                Err(error)
            }
            Err(error) => {
                debug!(%error, position = self.cursor, "recovered from parse error");
                self.last_message = Some(error.to_string());
                self.last_error = Some(error);
                Ok(None)
            }
        }
    }

    /// Returns the error most recently absorbed by a recovery point.
    #[must_use]
    pub const fn last_error(&self) -> Option<&ParseError> {
        self.last_error.as_ref()
    }

    /// Returns the message of the most recently absorbed error.
    #[must_use]
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Forgets the most recently absorbed error.
    pub fn clear_error(&mut self) {
        self.last_error = None;
        self.last_message = None;
    }
}
