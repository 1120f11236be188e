//! Engine configuration for catalog and capture capacities.

use serde::{Deserialize, Serialize};

/// Engine configuration bounding the user-terminal catalog and the capture
/// buffer.
///
/// # Defaults
///
/// - `max_user_terminals`: 6
/// - `max_captures`: 10
///
/// # Example
///
/// ```
/// use microparse::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.max_user_terminals(), 6);
/// assert_eq!(config.max_captures(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of user-defined terminals a registry accepts.
    max_user_terminals: usize,
    /// Maximum number of terminals accepted by a single matcher call.
    max_captures: usize,
}

impl EngineConfig {
    /// Creates a new engine configuration with explicit values.
    #[must_use]
    pub const fn new(max_user_terminals: usize, max_captures: usize) -> Self {
        Self {
            max_user_terminals,
            max_captures,
        }
    }

    /// Returns the user-terminal catalog capacity.
    #[must_use]
    pub const fn max_user_terminals(&self) -> usize {
        self.max_user_terminals
    }

    /// Returns the capture buffer capacity.
    #[must_use]
    pub const fn max_captures(&self) -> usize {
        self.max_captures
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_user_terminals: 6,
            max_captures: 10,
        }
    }
}
