//! Byte spans locating matched text within a line.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A half-open byte range within the current line.
///
/// # Example
///
/// ```
/// use microparse::Span;
///
/// let span = Span::new(2, 3);
/// assert_eq!(span.start(), 2);
/// assert_eq!(span.end(), 5);
/// assert_eq!(span.range(), 2..5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub offset: usize,
    /// Length in bytes.
    pub len: usize,
}

impl Span {
    /// Creates a span from an offset and a length.
    #[must_use]
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Creates a span covering `start..end`.
    ///
    /// An inverted range produces an empty span at `start`.
    #[must_use]
    pub const fn between(start: usize, end: usize) -> Self {
        Self {
            offset: start,
            len: end.saturating_sub(start),
        }
    }

    /// Returns the inclusive start byte offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.offset
    }

    /// Returns the exclusive end byte offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset.saturating_add(self.len)
    }

    /// Returns the length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` for zero-width spans.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the span as a byte range.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }
}

/// Converts a byte offset into a one-based character column.
///
/// Offsets past the end of `line` are clamped to the line length.
pub(crate) fn column_of(line: &str, offset: usize) -> usize {
    let prefix = line.get(..offset.min(line.len())).unwrap_or(line);
    prefix.chars().count().saturating_add(1)
}
