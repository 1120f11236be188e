//! Unit tests for the calculator.

mod cli_tests;
mod run_tests;
