//! Capture slots populated by the matcher.
//!
//! Each matcher call clears the buffer and writes one [`CaptureSlot`] per
//! successfully matched terminal, at the terminal's index in the call. Slots
//! carry no identity beyond "results of the most recent call".

use std::any::Any;
use std::fmt;

use crate::registry::UserValue;
use crate::span::Span;
use crate::terminal::Terminal;

/// The decoded value of a capture.
#[derive(Clone, Default)]
#[non_exhaustive]
pub enum CaptureValue {
    /// The terminal kind carries no decoded value.
    #[default]
    None,
    /// Value of an [`Terminal::Integer`] match.
    Integer(i64),
    /// Opaque value produced by a user scanner.
    User(UserValue),
}

impl fmt::Debug for CaptureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Integer(value) => f.debug_tuple("Integer").field(value).finish(),
            Self::User(_) => f.write_str("User(..)"),
        }
    }
}

/// Result record for one matched terminal.
#[derive(Debug, Clone)]
pub struct CaptureSlot<'l> {
    terminal: Terminal,
    span: Span,
    text: &'l str,
    value: CaptureValue,
}

impl<'l> CaptureSlot<'l> {
    pub(crate) const fn new(
        terminal: Terminal,
        span: Span,
        text: &'l str,
        value: CaptureValue,
    ) -> Self {
        Self {
            terminal,
            span,
            text,
            value,
        }
    }

    /// Returns the terminal that produced this capture.
    #[must_use]
    pub const fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    /// Returns the span of the capture within the line.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the captured text.
    ///
    /// For quoted strings this excludes the surrounding quotes.
    #[must_use]
    pub const fn text(&self) -> &'l str {
        self.text
    }

    /// Returns the captured text clipped to at most `max` bytes, shortened
    /// further if needed to end on a character boundary.
    #[must_use]
    pub fn truncated(&self, max: usize) -> &'l str {
        let mut end = max.min(self.text.len());
        while !self.text.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        self.text.get(..end).unwrap_or_default()
    }

    /// Returns the decoded value.
    #[must_use]
    pub const fn value(&self) -> &CaptureValue {
        &self.value
    }

    /// Returns the integer value of an [`Terminal::Integer`] capture.
    #[must_use]
    pub const fn integer(&self) -> Option<i64> {
        match self.value {
            CaptureValue::Integer(value) => Some(value),
            CaptureValue::None | CaptureValue::User(_) => None,
        }
    }

    /// Returns the user scanner's value if it has type `T`.
    #[must_use]
    pub fn user_value<T: Any>(&self) -> Option<&T> {
        match &self.value {
            CaptureValue::User(value) => (**value).downcast_ref::<T>(),
            CaptureValue::None | CaptureValue::Integer(_) => None,
        }
    }
}

/// Fixed-capacity capture buffer.
#[derive(Debug)]
pub(crate) struct Captures<'l> {
    slots: Vec<Option<CaptureSlot<'l>>>,
    capacity: usize,
}

impl<'l> Captures<'l> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Empties the buffer and sizes it for a call with `count` terminals.
    pub(crate) fn reset(&mut self, count: usize) {
        self.slots.clear();
        self.slots.resize_with(count.min(self.capacity), || None);
    }

    pub(crate) fn store(&mut self, index: usize, slot: CaptureSlot<'l>) {
        if let Some(entry) = self.slots.get_mut(index) {
            *entry = Some(slot);
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<&CaptureSlot<'l>> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub(crate) const fn as_slice(&self) -> &[Option<CaptureSlot<'l>>] {
        self.slots.as_slice()
    }
}
