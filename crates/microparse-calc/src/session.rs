//! Line-by-line evaluation with per-line recovery.

use microparse::{IntegrityError, Parser, RegistryError, TerminalRegistry};
use rand::RngCore;
use tracing::debug;

use crate::grammar::{Evaluator, scan_hex};
use crate::variables::Variables;

/// Outcome of evaluating one input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineReport {
    values: Vec<i64>,
    error: Option<String>,
    quit: bool,
}

impl LineReport {
    /// Returns the values of the expressions evaluated before any error.
    #[must_use]
    pub const fn values(&self) -> &[i64] {
        self.values.as_slice()
    }

    /// Returns the message of the error that ended the line, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns `true` when the line asked to end the session.
    #[must_use]
    pub const fn is_quit(&self) -> bool {
        self.quit
    }
}

/// A calculator session: the terminal catalog plus evaluator state.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
///
/// use microparse_calc::Session;
///
/// let vars = BTreeMap::from([(String::from("x"), String::from("6"))]);
/// let mut session = Session::new(&vars, 10)?;
/// let report = session.evaluate("x * 7, 0x10")?;
/// assert_eq!(report.values(), &[42, 16]);
/// assert_eq!(report.error(), None);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Session<'v> {
    registry: TerminalRegistry,
    evaluator: Evaluator<'v>,
}

impl<'v> Session<'v> {
    /// Creates a session drawing `rnd()` values from the thread-local
    /// generator.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] if the grammar's terminals cannot be
    /// registered.
    pub fn new(variables: &'v dyn Variables, max_args: usize) -> Result<Self, RegistryError> {
        Self::with_rng(variables, max_args, Box::new(rand::thread_rng()))
    }

    /// Creates a session with an explicit random number generator.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] if the grammar's terminals cannot be
    /// registered.
    pub fn with_rng(
        variables: &'v dyn Variables,
        max_args: usize,
        rng: Box<dyn RngCore>,
    ) -> Result<Self, RegistryError> {
        let mut registry = TerminalRegistry::new();
        let hex = registry.register("hex", scan_hex)?;
        Ok(Self {
            registry,
            evaluator: Evaluator::new(hex, variables, rng, max_args),
        })
    }

    /// Evaluates one line as a single unit of work.
    ///
    /// Parse and evaluation errors end the line and are reported in the
    /// returned [`LineReport`].
    ///
    /// # Errors
    ///
    /// Returns an [`IntegrityError`] if the engine detects a programming
    /// error.
    pub fn evaluate(&mut self, line: &str) -> Result<LineReport, IntegrityError> {
        let mut parser = Parser::new(&self.registry, line);
        let evaluator = &mut self.evaluator;
        let mut values = Vec::new();
        let outcome = parser.recover(|p| evaluator.line(p, &mut values))?;
        let error = parser.last_message().map(str::to_owned);
        debug!(
            line = parser.line(),
            values = values.len(),
            failed = error.is_some(),
            "evaluated line"
        );
        Ok(LineReport {
            values,
            error,
            quit: outcome.unwrap_or(false),
        })
    }
}
