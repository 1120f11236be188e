//! Terminal descriptors accepted by the matcher.
//!
//! A [`Terminal`] names one category of matchable input: a built-in class
//! such as [`Terminal::Integer`], a user-defined class registered with a
//! [`TerminalRegistry`](crate::TerminalRegistry), or literal text. The
//! variant tag alone decides how a terminal is matched, so literal text that
//! happens to spell a built-in or registered name is still matched verbatim.

use std::borrow::Cow;
use std::fmt;

/// Opaque reference to a user-defined terminal.
///
/// Handles are only produced by
/// [`TerminalRegistry::register`](crate::TerminalRegistry::register) and
/// remember which registry issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalHandle {
    pub(crate) registry: u64,
    pub(crate) index: usize,
}

impl TerminalHandle {
    /// Returns the position of the terminal within its catalog.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// A matchable category of input.
///
/// # Example
///
/// ```
/// use microparse::Terminal;
///
/// let open = Terminal::from("(");
/// assert_eq!(open, Terminal::literal("("));
/// assert!(open.is_literal());
/// assert!(!Terminal::Identifier.is_literal());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Terminal {
    /// Zero-width match at the end of the line.
    EndOfInput,
    /// Double-quoted text; the capture excludes the quotes.
    QuotedString,
    /// A letter or underscore followed by letters, digits or underscores.
    Identifier,
    /// An identifier that contains at least one glob flag (`?`, `*`, `[`).
    IdentifierWithWildcard,
    /// A non-negative decimal integer that fits in an `i64`.
    Integer,
    /// A maximal run of non-whitespace characters.
    Word,
    /// A user-defined terminal registered in a catalog.
    User(TerminalHandle),
    /// Text matched verbatim at the cursor.
    Literal(Cow<'static, str>),
}

impl Terminal {
    /// Creates a literal terminal.
    #[must_use]
    pub fn literal(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Literal(text.into())
    }

    /// Returns `true` for literal text terminals.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Returns the display name of a built-in kind.
    ///
    /// User-defined and literal terminals return `None`; their names live in
    /// the registry and in the literal text respectively.
    #[must_use]
    pub const fn builtin_name(&self) -> Option<&'static str> {
        match self {
            Self::EndOfInput => Some("end of line"),
            Self::QuotedString => Some("quoted string"),
            Self::Identifier => Some("identifier"),
            Self::IdentifierWithWildcard => Some("identifier+glob"),
            Self::Integer => Some("integer"),
            Self::Word => Some("word"),
            Self::User(_) | Self::Literal(_) => None,
        }
    }
}

impl From<&'static str> for Terminal {
    fn from(text: &'static str) -> Self {
        Self::Literal(Cow::Borrowed(text))
    }
}

impl From<String> for Terminal {
    fn from(text: String) -> Self {
        Self::Literal(Cow::Owned(text))
    }
}

impl From<TerminalHandle> for Terminal {
    fn from(handle: TerminalHandle) -> Self {
        Self::User(handle)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(handle) => write!(f, "<user terminal #{}>", handle.index),
            Self::Literal(text) => write!(f, "\"{text}\""),
            builtin => {
                let name = builtin.builtin_name().unwrap_or_default();
                write!(f, "<{name}>")
            }
        }
    }
}
