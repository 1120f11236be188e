//! Integration tests for the `microparse-calc` binary.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;

#[test]
fn expression_flag_prints_result() {
    let mut command = cargo_bin_cmd!("microparse-calc");
    command.args(["--expr", "6 * 7"]);
    command.assert().success().stdout(" = 42\n");
}

#[test]
fn stdin_lines_are_evaluated_until_quit() {
    let mut command = cargo_bin_cmd!("microparse-calc");
    command.write_stdin("1 + 2\nquit\n3\n");
    command.assert().success().stdout(" = 3\n");
}

#[test]
fn environment_supplies_variables() {
    let mut command = cargo_bin_cmd!("microparse-calc");
    command.env("WIDTH", "80").args(["--expr", "WIDTH / 2"]);
    command.assert().success().stdout(" = 40\n");
}

#[test]
fn failing_line_sets_exit_status() {
    let mut command = cargo_bin_cmd!("microparse-calc");
    command.env_remove("UNDEFINED_CALC_VAR");
    command.write_stdin("UNDEFINED_CALC_VAR\n1\n");
    command
        .assert()
        .failure()
        .stdout(" = 1\n")
        .stderr(contains("UNDEFINED_CALC_VAR not found in environment"));
}

#[test]
fn invalid_log_filter_is_reported() {
    let mut command = cargo_bin_cmd!("microparse-calc");
    command.args(["--log-filter", "microparse=notalevel", "--expr", "1"]);
    command
        .assert()
        .failure()
        .stderr(contains("invalid log filter"));
}

#[test]
fn debug_logs_go_to_stderr() {
    let mut command = cargo_bin_cmd!("microparse-calc");
    command.args([
        "--log-filter",
        "debug",
        "--log-format",
        "json",
        "--expr",
        "1",
    ]);
    command
        .assert()
        .success()
        .stdout(" = 1\n")
        .stderr(contains("evaluated line"));
}
