//! Unit tests for the `microparse` engine.

mod capture_tests;
mod config_tests;
mod recovery_tests;
mod terminal_tests;
