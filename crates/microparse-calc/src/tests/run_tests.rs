//! Tests for the top-level runner.

use std::ffi::OsString;
use std::io::Cursor;
use std::process::ExitCode;

use crate::run;

struct Captured {
    code: ExitCode,
    stdout: String,
    stderr: String,
}

fn invoke(args: &[&str], input: &str) -> Captured {
    invoke_bytes(args, input.as_bytes())
}

fn invoke_bytes(args: &[&str], input: &[u8]) -> Captured {
    let mut argv = vec![OsString::from("microparse-calc")];
    argv.extend(args.iter().map(OsString::from));
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run(argv, Cursor::new(input.to_vec()), &mut stdout, &mut stderr);
    Captured {
        code,
        stdout: String::from_utf8(stdout).expect("utf-8 stdout"),
        stderr: String::from_utf8(stderr).expect("utf-8 stderr"),
    }
}

#[test]
fn session_reports_each_line() {
    let output = invoke(&[], "1 + 1\n2 * (3\n4, 5\nq\n6\n");
    assert_eq!(output.code, ExitCode::FAILURE);
    assert_eq!(output.stdout, " = 2\n = 4\n = 5\n");
    assert_eq!(output.stderr, "expected \")\" at position 7\n");
}

#[test]
fn clean_session_succeeds() {
    let output = invoke(&[], "1\n\n2, 3\n");
    assert_eq!(output.code, ExitCode::SUCCESS);
    assert_eq!(output.stdout, " = 1\n = 2\n = 3\n");
    assert!(output.stderr.is_empty());
}

#[test]
fn expr_flag_ignores_stdin() {
    let output = invoke(&["--expr", "max(2, 9) - 1"], "100\n");
    assert_eq!(output.code, ExitCode::SUCCESS);
    assert_eq!(output.stdout, " = 8\n");
}

#[test]
fn failing_expr_flag_fails() {
    let output = invoke(&["--expr", "nosuch(1)"], "");
    assert_eq!(output.code, ExitCode::FAILURE);
    assert_eq!(output.stderr, "undefined function nosuch\n");
}

#[test]
fn help_goes_to_stdout() {
    let output = invoke(&["--help"], "");
    assert_eq!(output.code, ExitCode::SUCCESS);
    assert!(output.stdout.contains("--max-args"));
    assert!(output.stderr.is_empty());
}

#[test]
fn usage_errors_go_to_stderr() {
    let output = invoke(&["--max-args", "many"], "");
    assert_eq!(output.code, ExitCode::FAILURE);
    assert!(output.stderr.contains("--max-args"));
}

#[test]
fn invalid_utf8_line_fails_alone() {
    let output = invoke_bytes(&[], b"1\n\xff\n2\n");
    assert_eq!(output.code, ExitCode::FAILURE);
    assert_eq!(output.stdout, " = 1\n = 2\n");
    assert_eq!(output.stderr, "invalid UTF-8 on line 2\n");
}

#[test]
fn crlf_line_endings_are_trimmed() {
    let output = invoke(&[], "1 + 2\r\n3\r\n");
    assert_eq!(output.code, ExitCode::SUCCESS);
    assert_eq!(output.stdout, " = 3\n = 3\n");
}
