//! A micro-parse engine for hand-written, line-oriented grammars.
//!
//! Grammar functions drive a [`Parser`] over one line at a time, offering it
//! lists of [`Terminal`]s to match either as alternatives or as a sequence.
//! Matches fill capture slots with the matched text and decoded values;
//! strict call forms turn a no-match into a [`ParseError`] carrying a
//! ready-made "expected ..." [`Diagnostic`], and [`Parser::recover`] marks
//! the point a failed parse unwinds to.
//!
//! # Core types
//!
//! - [`Terminal`] and [`TerminalHandle`] - matchable categories of input
//! - [`TerminalRegistry`] - catalog of user-defined terminals
//! - [`Parser`] - per-line matching state and the four call forms
//! - [`CaptureSlot`] and [`CaptureValue`] - per-terminal match results
//! - [`Diagnostic`] and [`ParseError`] - failure reporting and unwinding
//! - [`EngineConfig`] - catalog and capture capacities
//!
//! # Example
//!
//! ```
//! use microparse::{Parser, Terminal, TerminalRegistry};
//!
//! let registry = TerminalRegistry::new();
//! let mut parser = Parser::new(&registry, "x[5");
//! let outcome = parser.recover(|p| {
//!     p.expect_all(&[Terminal::Identifier, "[".into(), Terminal::Integer, "]".into()])
//! })?;
//! assert!(outcome.is_none());
//! assert_eq!(parser.last_message(), Some("expected \"]\" at position 4"));
//! # Ok::<(), microparse::IntegrityError>(())
//! ```

mod capture;
mod config;
mod diagnostic;
mod error;
mod matcher;
mod parser;
mod recovery;
mod registry;
mod span;
mod terminal;

pub use capture::{CaptureSlot, CaptureValue};
pub use config::EngineConfig;
pub use diagnostic::{Diagnostic, build_message};
pub use error::{IntegrityError, ParseError, RegistryError};
pub use matcher::{FailureRecord, MatchOutcome, Mode};
pub use parser::Parser;
pub use registry::{Resolved, Scanned, TerminalRegistry, TerminalScanner, UserTerminal, UserValue};
pub use span::Span;
pub use terminal::{Terminal, TerminalHandle};

#[cfg(test)]
mod tests;
