//! The matching engine.
//!
//! [`Parser::match_terminals`] runs a list of terminals against the cursor in
//! one of two modes:
//!
//! - [`Mode::Any`] tries every terminal from the same start position and
//!   commits the first that matches. When all fail the cursor stays put.
//! - [`Mode::All`] matches the terminals in sequence, each starting where the
//!   previous one ended. The first failure rolls the cursor back to where the
//!   call started.
//!
//! Leading whitespace is skipped before each attempt and trailing whitespace
//! after each success. Fatal conditions (unterminated strings, integer
//! overflow, scanner errors) abort the call with the cursor untouched.

mod scan;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::capture::{CaptureSlot, CaptureValue};
use crate::error::{IntegrityError, ParseError};
use crate::parser::Parser;
use crate::span::{Span, column_of};
use crate::terminal::{Terminal, TerminalHandle};

use scan::Scan;

/// Backtracking mode of a matcher call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// First of many: independent alternatives at one position.
    Any,
    /// Sequence: every terminal in order.
    All,
}

/// Where and on which terminal a matcher call failed.
///
/// In [`Mode::Any`] the index is always 0 and the position is the call's
/// start, since every alternative failed from the same place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    index: usize,
    position: usize,
    column: usize,
}

impl FailureRecord {
    /// Creates a failure record.
    #[must_use]
    pub const fn new(index: usize, position: usize, column: usize) -> Self {
        Self {
            index,
            position,
            column,
        }
    }

    /// Returns the index of the first failing terminal.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the byte offset at which the failure was detected.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the one-based character column of the failure.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }
}

/// Result of a matcher call that did not hit a fatal condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The call succeeded and the cursor was committed.
    Matched,
    /// The call failed and the cursor is where it started.
    Failed(FailureRecord),
}

impl MatchOutcome {
    /// Returns `true` for [`MatchOutcome::Matched`].
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        matches!(self, Self::Matched)
    }
}

impl Parser<'_, '_> {
    /// Matches `terminals` at the cursor in the given mode.
    ///
    /// Capture slots are cleared first and then filled for every terminal
    /// that matched during this call.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for fatal conditions, and
    /// [`IntegrityError::TooManyTerminals`] when `terminals` exceeds the
    /// capture buffer.
    pub fn match_terminals(
        &mut self,
        mode: Mode,
        terminals: &[Terminal],
    ) -> Result<MatchOutcome, ParseError> {
        let capacity = self.captures.capacity();
        if terminals.len() > capacity {
            let error = IntegrityError::TooManyTerminals {
                count: terminals.len(),
                capacity,
            };
            warn!(%error, "rejected matcher call");
            return Err(error.into());
        }

        self.captures.reset(terminals.len());
        self.matched = None;
        self.failure = None;

        let outcome = match mode {
            Mode::Any => self.match_any(terminals)?,
            Mode::All => self.match_all(terminals)?,
        };
        if let MatchOutcome::Failed(failure) = outcome {
            self.failure = Some(failure);
        }
        Ok(outcome)
    }

    fn match_any(&mut self, terminals: &[Terminal]) -> Result<MatchOutcome, ParseError> {
        let start = self.cursor;
        let at = scan::skip_space(self.line, start);
        for (index, terminal) in terminals.iter().enumerate() {
            if let Some(end) = self.attempt(index, terminal, at)? {
                self.cursor = scan::skip_space(self.line, end);
                self.matched = Some(index);
                return Ok(MatchOutcome::Matched);
            }
        }
        Ok(MatchOutcome::Failed(FailureRecord::new(
            0,
            start,
            column_of(self.line, start),
        )))
    }

    fn match_all(&mut self, terminals: &[Terminal]) -> Result<MatchOutcome, ParseError> {
        let mut pos = self.cursor;
        for (index, terminal) in terminals.iter().enumerate() {
            let at = scan::skip_space(self.line, pos);
            match self.attempt(index, terminal, at)? {
                Some(end) => pos = scan::skip_space(self.line, end),
                None => {
                    return Ok(MatchOutcome::Failed(FailureRecord::new(
                        index,
                        at,
                        column_of(self.line, at),
                    )));
                }
            }
        }
        self.cursor = pos;
        Ok(MatchOutcome::Matched)
    }

    /// Attempts one terminal at `at`, storing its capture on success.
    ///
    /// Returns the byte offset just past the consumed input.
    fn attempt(
        &mut self,
        index: usize,
        terminal: &Terminal,
        at: usize,
    ) -> Result<Option<usize>, ParseError> {
        let scanned = match terminal {
            Terminal::EndOfInput => scan::end_of_input(self.line, at),
            Terminal::QuotedString => scan::quoted_string(self.line, at)?,
            Terminal::Identifier => scan::identifier(self.line, at),
            Terminal::IdentifierWithWildcard => scan::identifier_with_wildcard(self.line, at),
            Terminal::Integer => scan::integer(self.line, at)?,
            Terminal::Word => scan::word(self.line, at),
            Terminal::Literal(text) => scan::literal(self.line, at, text),
            Terminal::User(handle) => self.scan_user(*handle, index, at)?,
        };
        trace!(
            index,
            terminal = %terminal,
            position = at,
            matched = scanned.is_some(),
            "terminal attempt"
        );

        let Some(Scan { span, end, value }) = scanned else {
            return Ok(None);
        };
        let text = self.line.get(span.range()).unwrap_or_default();
        self.captures
            .store(index, CaptureSlot::new(terminal.clone(), span, text, value));
        Ok(Some(end))
    }

    fn scan_user(
        &self,
        handle: TerminalHandle,
        index: usize,
        at: usize,
    ) -> Result<Option<Scan>, ParseError> {
        let user = self.registry.get(handle).inspect_err(|error| {
            warn!(%error, "unresolvable user terminal");
        })?;
        let rest = self.line.get(at..).unwrap_or_default();
        let scanned = user.scanner().scan(rest, index)?;
        if scanned.is_empty() {
            return Ok(None);
        }

        let consumed = scanned.len();
        if consumed > rest.len() || !rest.is_char_boundary(consumed) {
            let error = IntegrityError::ScannerOverrun {
                name: user.name().to_owned(),
                consumed,
                available: rest.len(),
            };
            warn!(%error, "user scanner misreported its match");
            return Err(error.into());
        }

        let value = scanned
            .into_value()
            .map_or(CaptureValue::None, CaptureValue::User);
        Ok(Some(Scan {
            span: Span::new(at, consumed),
            end: at.saturating_add(consumed),
            value,
        }))
    }
}
