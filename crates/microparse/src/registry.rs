//! Catalog of user-defined terminals.
//!
//! Built-in terminal kinds are variants of [`Terminal`] and need no
//! registration. User-defined kinds are appended to a [`TerminalRegistry`]
//! once each and referenced afterwards through the returned
//! [`TerminalHandle`]. The catalog never shrinks.

use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{IntegrityError, ParseError, RegistryError};
use crate::terminal::{Terminal, TerminalHandle};

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// An opaque value produced by a user scanner and stored in a capture slot.
pub type UserValue = Rc<dyn Any>;

/// Result of running a user scanner over the remaining line.
///
/// # Example
///
/// ```
/// use microparse::Scanned;
///
/// let hit = Scanned::new(3).with_value(1.5_f32);
/// assert_eq!(hit.len(), 3);
/// assert!(Scanned::none().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct Scanned {
    len: usize,
    value: Option<UserValue>,
}

impl Scanned {
    /// Reports a match of `len` bytes with no decoded value.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, value: None }
    }

    /// Reports that the scanner did not match.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(0)
    }

    /// Attaches a decoded value to the match.
    #[must_use]
    pub fn with_value<T: Any>(mut self, value: T) -> Self {
        self.value = Some(Rc::new(value));
        self
    }

    /// Returns the number of bytes consumed.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when nothing was consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn into_value(self) -> Option<UserValue> {
        self.value
    }
}

impl fmt::Debug for Scanned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanned")
            .field("len", &self.len)
            .field("has_value", &self.value.is_some())
            .finish()
    }
}

/// Matching logic for a user-defined terminal.
///
/// `rest` is the line from the current scan position (leading whitespace
/// already skipped) and `slot` is the capture slot the result will occupy.
/// Returning [`Scanned::none`] reports an ordinary no-match; returning an
/// error unwinds the parse.
pub trait TerminalScanner {
    /// Scans the start of `rest`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for conditions that must abort the parse,
    /// such as out-of-range numeric values.
    fn scan(&self, rest: &str, slot: usize) -> Result<Scanned, ParseError>;
}

impl<F> TerminalScanner for F
where
    F: Fn(&str, usize) -> Result<Scanned, ParseError>,
{
    fn scan(&self, rest: &str, slot: usize) -> Result<Scanned, ParseError> {
        self(rest, slot)
    }
}

/// A registered user-defined terminal.
pub struct UserTerminal {
    name: String,
    scanner: Box<dyn TerminalScanner>,
}

impl UserTerminal {
    /// Returns the registered name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the terminal's scanner.
    #[must_use]
    pub fn scanner(&self) -> &dyn TerminalScanner {
        self.scanner.as_ref()
    }
}

impl fmt::Debug for UserTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserTerminal")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// How a terminal reference resolves against a registry.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    /// A built-in kind with its display name.
    Builtin(&'static str),
    /// A registered user-defined terminal.
    User(&'a UserTerminal),
    /// Literal text to match verbatim.
    Literal(&'a str),
}

impl Resolved<'_> {
    /// Returns `true` for built-in and registered kinds.
    #[must_use]
    pub const fn is_kind(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }
}

/// Append-only catalog of user-defined terminals.
///
/// # Example
///
/// ```
/// use microparse::{Scanned, Terminal, TerminalRegistry};
///
/// let mut registry = TerminalRegistry::new();
/// let hex = registry
///     .register("hex", |rest: &str, _slot: usize| {
///         let len = rest.bytes().take_while(u8::is_ascii_hexdigit).count();
///         Ok(Scanned::new(len))
///     })
///     .expect("catalog has room");
/// assert_eq!(registry.len(), 1);
/// assert!(registry.resolve(&Terminal::User(hex)).is_ok());
/// ```
pub struct TerminalRegistry {
    id: u64,
    capacity: usize,
    terminals: Vec<UserTerminal>,
}

impl TerminalRegistry {
    /// Creates an empty registry with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Creates an empty registry sized by `config`.
    #[must_use]
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            capacity: config.max_user_terminals(),
            terminals: Vec::new(),
        }
    }

    /// Registers a closure as a user-defined terminal and returns its
    /// handle.
    ///
    /// # Errors
    ///
    /// See [`register_scanner`](Self::register_scanner).
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        scanner: F,
    ) -> Result<TerminalHandle, RegistryError>
    where
        F: Fn(&str, usize) -> Result<Scanned, ParseError> + 'static,
    {
        self.register_scanner(name, scanner)
    }

    /// Registers a user-defined terminal and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CatalogFull`] when the catalog is at
    /// capacity, [`RegistryError::DuplicateName`] when `name` is taken, and
    /// [`RegistryError::EmptyName`] for an empty name.
    pub fn register_scanner<S>(
        &mut self,
        name: impl Into<String>,
        scanner: S,
    ) -> Result<TerminalHandle, RegistryError>
    where
        S: TerminalScanner + 'static,
    {
        let owned = name.into();
        if owned.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.terminals.iter().any(|t| t.name == owned) {
            return Err(RegistryError::DuplicateName { name: owned });
        }
        if self.terminals.len() >= self.capacity {
            return Err(RegistryError::CatalogFull {
                capacity: self.capacity,
            });
        }

        let handle = TerminalHandle {
            registry: self.id,
            index: self.terminals.len(),
        };
        debug!(name = %owned, index = handle.index, "registered user terminal");
        self.terminals.push(UserTerminal {
            name: owned,
            scanner: Box::new(scanner),
        });
        Ok(handle)
    }

    /// Looks up the terminal behind `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrityError::UnknownHandle`] when `handle` was issued by
    /// another registry.
    pub fn get(&self, handle: TerminalHandle) -> Result<&UserTerminal, IntegrityError> {
        if handle.registry != self.id {
            return Err(IntegrityError::UnknownHandle {
                index: handle.index,
            });
        }
        self.terminals
            .get(handle.index)
            .ok_or(IntegrityError::UnknownHandle {
                index: handle.index,
            })
    }

    /// Classifies `terminal` as a built-in kind, a registered kind, or
    /// literal text.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrityError::UnknownHandle`] for user terminals this
    /// registry did not issue.
    pub fn resolve<'a>(&'a self, terminal: &'a Terminal) -> Result<Resolved<'a>, IntegrityError> {
        match terminal {
            Terminal::User(handle) => self.get(*handle).map(Resolved::User),
            Terminal::Literal(text) => Ok(Resolved::Literal(text.as_ref())),
            builtin => Ok(Resolved::Builtin(
                builtin.builtin_name().unwrap_or_default(),
            )),
        }
    }

    /// Returns the number of registered terminals.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.terminals.len()
    }

    /// Returns `true` if nothing has been registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }

    /// Returns the catalog capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over registered terminal names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.terminals.iter().map(UserTerminal::name)
    }
}

impl Default for TerminalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TerminalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalRegistry")
            .field("capacity", &self.capacity)
            .field("terminals", &self.terminals)
            .finish_non_exhaustive()
    }
}
