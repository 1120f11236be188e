//! Parsing session over one line of input.
//!
//! A [`Parser`] is the context object threaded through hand-written grammar
//! functions. It borrows a [`TerminalRegistry`] and the current line, owns
//! the scan cursor, the capture buffer, the failure record of the last call
//! and the most recent recovered error, and exposes the four call forms:
//!
//! | form                         | mode  | on no-match               |
//! |------------------------------|-------|---------------------------|
//! | [`accept`](Parser::accept)         | Any   | `Ok(false)`               |
//! | [`accept_all`](Parser::accept_all) | All   | `Ok(false)`               |
//! | [`expect`](Parser::expect)         | Any   | `Err(ParseError::Expected)` |
//! | [`expect_all`](Parser::expect_all) | All   | `Err(ParseError::Expected)` |

use std::any::Any;

use crate::capture::{CaptureSlot, Captures};
use crate::config::EngineConfig;
use crate::diagnostic::Diagnostic;
use crate::error::{IntegrityError, ParseError};
use crate::matcher::{FailureRecord, MatchOutcome, Mode};
use crate::registry::TerminalRegistry;
use crate::terminal::Terminal;

/// Matching state for one line of input.
///
/// # Example
///
/// ```
/// use microparse::{Parser, Terminal, TerminalRegistry};
///
/// let registry = TerminalRegistry::new();
/// let mut parser = Parser::new(&registry, "  42 ");
///
/// let matched = parser.accept_all(&[Terminal::Integer, Terminal::EndOfInput])?;
/// assert!(matched);
/// assert_eq!(parser.integer(0), Some(42));
/// assert!(parser.at_end());
/// # Ok::<(), microparse::ParseError>(())
/// ```
#[derive(Debug)]
pub struct Parser<'r, 'l> {
    pub(crate) registry: &'r TerminalRegistry,
    pub(crate) line: &'l str,
    pub(crate) cursor: usize,
    pub(crate) captures: Captures<'l>,
    pub(crate) matched: Option<usize>,
    pub(crate) failure: Option<FailureRecord>,
    pub(crate) last_error: Option<ParseError>,
    pub(crate) last_message: Option<String>,
}

impl<'r, 'l> Parser<'r, 'l> {
    /// Creates a session over `line` with the default capture capacity.
    #[must_use]
    pub fn new(registry: &'r TerminalRegistry, line: &'l str) -> Self {
        Self::with_config(registry, line, &EngineConfig::default())
    }

    /// Creates a session over `line` with the capture capacity from
    /// `config`.
    #[must_use]
    pub fn with_config(registry: &'r TerminalRegistry, line: &'l str, config: &EngineConfig) -> Self {
        Self {
            registry,
            line: terminated(line),
            cursor: 0,
            captures: Captures::with_capacity(config.max_captures()),
            matched: None,
            failure: None,
            last_error: None,
            last_message: None,
        }
    }

    /// Replaces the line and moves the cursor to its start.
    ///
    /// Captures and the failure record are cleared; the last recovered error
    /// is kept until the next one replaces it.
    pub fn reset(&mut self, line: &'l str) {
        self.line = terminated(line);
        self.cursor = 0;
        self.captures.reset(0);
        self.matched = None;
        self.failure = None;
    }

    /// Returns the registry this session resolves user terminals against.
    #[must_use]
    pub const fn registry(&self) -> &'r TerminalRegistry {
        self.registry
    }

    /// Returns the current line, without its terminator.
    #[must_use]
    pub const fn line(&self) -> &'l str {
        self.line
    }

    /// Returns the scan cursor as a byte offset into the line.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor
    }

    /// Returns the unscanned remainder of the line.
    #[must_use]
    pub fn rest(&self) -> &'l str {
        self.line.get(self.cursor..).unwrap_or_default()
    }

    /// Returns `true` once the cursor has reached the end of the line.
    #[must_use]
    pub const fn at_end(&self) -> bool {
        self.cursor >= self.line.len()
    }

    /// Tries each terminal at the cursor and takes the first that matches.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] only for fatal conditions; a no-match is
    /// `Ok(false)`.
    pub fn accept(&mut self, terminals: &[Terminal]) -> Result<bool, ParseError> {
        self.match_terminals(Mode::Any, terminals)
            .map(|outcome| outcome.is_matched())
    }

    /// Matches every terminal in sequence.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] only for fatal conditions; a no-match is
    /// `Ok(false)`.
    pub fn accept_all(&mut self, terminals: &[Terminal]) -> Result<bool, ParseError> {
        self.match_terminals(Mode::All, terminals)
            .map(|outcome| outcome.is_matched())
    }

    /// Like [`accept`](Self::accept), but a no-match is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Expected`] describing the alternatives when none
    /// matches, or any fatal condition raised while matching.
    pub fn expect(&mut self, terminals: &[Terminal]) -> Result<(), ParseError> {
        self.require(Mode::Any, terminals)
    }

    /// Like [`accept_all`](Self::accept_all), but a no-match is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Expected`] listing the terminals from the one
    /// that failed, or any fatal condition raised while matching.
    pub fn expect_all(&mut self, terminals: &[Terminal]) -> Result<(), ParseError> {
        self.require(Mode::All, terminals)
    }

    fn require(&mut self, mode: Mode, terminals: &[Terminal]) -> Result<(), ParseError> {
        match self.match_terminals(mode, terminals)? {
            MatchOutcome::Matched => Ok(()),
            MatchOutcome::Failed(failure) => {
                let diagnostic =
                    Diagnostic::from_failure(self.registry, terminals, mode, &failure)?;
                Err(ParseError::Expected(diagnostic))
            }
        }
    }

    /// Describes the last failed call, if the last call failed.
    ///
    /// `terminals` and `mode` must be those of that call.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrityError::UnknownHandle`] for user terminals from
    /// another registry.
    pub fn diagnostic(
        &self,
        terminals: &[Terminal],
        mode: Mode,
    ) -> Result<Option<Diagnostic>, IntegrityError> {
        self.failure
            .map(|failure| Diagnostic::from_failure(self.registry, terminals, mode, &failure))
            .transpose()
    }

    /// Returns the failure record of the last call, if it failed.
    #[must_use]
    pub const fn failure(&self) -> Option<FailureRecord> {
        self.failure
    }

    /// Returns the index matched by the last successful Any-mode call.
    #[must_use]
    pub const fn matched(&self) -> Option<usize> {
        self.matched
    }

    /// Returns the capture of the terminal matched by the last Any-mode
    /// call.
    #[must_use]
    pub fn matched_capture(&self) -> Option<&CaptureSlot<'l>> {
        self.matched.and_then(|index| self.captures.get(index))
    }

    /// Returns capture slot `index` of the last call.
    #[must_use]
    pub fn capture(&self, index: usize) -> Option<&CaptureSlot<'l>> {
        self.captures.get(index)
    }

    /// Returns all capture slots of the last call, indexed by terminal.
    ///
    /// Terminals that did not match have an empty slot.
    #[must_use]
    pub const fn captures(&self) -> &[Option<CaptureSlot<'l>>] {
        self.captures.as_slice()
    }

    /// Returns the text captured in slot `index`.
    #[must_use]
    pub fn text(&self, index: usize) -> Option<&'l str> {
        self.captures.get(index).map(CaptureSlot::text)
    }

    /// Returns the integer captured in slot `index`.
    #[must_use]
    pub fn integer(&self, index: usize) -> Option<i64> {
        self.captures.get(index).and_then(CaptureSlot::integer)
    }

    /// Returns the user value captured in slot `index` if it has type `T`.
    #[must_use]
    pub fn user_value<T: Any>(&self, index: usize) -> Option<&T> {
        self.captures
            .get(index)
            .and_then(|slot| slot.user_value::<T>())
    }
}

/// Cuts `line` at its first newline or NUL.
fn terminated(line: &str) -> &str {
    line.find(['\n', '\0'])
        .and_then(|end| line.get(..end))
        .unwrap_or(line)
}
