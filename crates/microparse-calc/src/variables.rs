//! Variable lookup for identifiers that are not function calls.

use std::collections::BTreeMap;

/// Source of variable values.
///
/// Values are text; the evaluator parses them as integers.
pub trait Variables {
    /// Returns the raw value of `name`, if defined.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Resolves variables from the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Variables for ProcessEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Variables for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}
