//! Tests for recovery points and raised errors.

use rstest::{fixture, rstest};

use crate::{IntegrityError, ParseError, Parser, Scanned, Terminal, TerminalRegistry, raise};

#[fixture]
fn registry() -> TerminalRegistry {
    TerminalRegistry::new()
}

fn lookup(name: &str) -> Result<i64, ParseError> {
    if name == "x" {
        return Ok(1);
    }
    raise!("{name} not found in environment");
}

/// Parses `NAME` or `NAME + NAME`, raising from a nested call.
fn sum(parser: &mut Parser<'_, '_>) -> Result<i64, ParseError> {
    parser.expect(&[Terminal::Identifier])?;
    let mut total = lookup(parser.text(0).unwrap_or_default())?;
    while parser.accept(&["+".into()])? {
        parser.expect(&[Terminal::Identifier])?;
        total += lookup(parser.text(0).unwrap_or_default())?;
    }
    parser.expect(&[Terminal::EndOfInput])?;
    Ok(total)
}

#[rstest]
fn successful_unit_returns_its_value(registry: TerminalRegistry) {
    let mut parser = Parser::new(&registry, "x + x");
    assert_eq!(parser.recover(sum), Ok(Some(2)));
    assert_eq!(parser.last_message(), None);
}

#[rstest]
fn raised_error_unwinds_nested_calls(registry: TerminalRegistry) {
    let mut parser = Parser::new(&registry, "x + y");
    assert_eq!(parser.recover(sum), Ok(None));
    assert_eq!(parser.last_message(), Some("y not found in environment"));
    assert_eq!(
        parser.last_error(),
        Some(&ParseError::raised("y not found in environment"))
    );
}

#[rstest]
fn expected_error_becomes_last_message(registry: TerminalRegistry) {
    let mut parser = Parser::new(&registry, "x +");
    assert_eq!(parser.recover(sum), Ok(None));
    assert_eq!(
        parser.last_message(),
        Some("expected <identifier> at position 4")
    );
}

#[rstest]
fn fatal_matcher_condition_is_recovered(registry: TerminalRegistry) {
    let mut parser = Parser::new(&registry, "\"open");
    let outcome = parser.recover(|p| p.accept(&[Terminal::QuotedString]));
    assert_eq!(outcome, Ok(None));
    assert_eq!(parser.last_message(), Some("unterminated string at position 1"));
}

#[rstest]
fn inner_recovery_point_absorbs_only_its_own_errors(registry: TerminalRegistry) {
    let mut parser = Parser::new(&registry, "y");
    let outcome = parser.recover(|outer| {
        let inner = outer.recover(|p| {
            p.expect(&[Terminal::Identifier])?;
            lookup(p.text(0).unwrap_or_default())
        })?;
        assert_eq!(inner, None);
        Ok(inner.unwrap_or(-1))
    });
    assert_eq!(outcome, Ok(Some(-1)));
    assert_eq!(parser.last_message(), Some("y not found in environment"));
}

#[rstest]
fn error_after_inner_recovery_reaches_outer_point(registry: TerminalRegistry) {
    let mut parser = Parser::new(&registry, "x");
    let outcome: Result<Option<()>, IntegrityError> = parser.recover(|outer| {
        let inner = outer.recover(|p| lookup(p.line()))?;
        assert_eq!(inner, Some(1));
        raise!("outer failure");
    });
    assert_eq!(outcome, Ok(None));
    assert_eq!(parser.last_message(), Some("outer failure"));
}

#[rstest]
fn integrity_errors_escape_recovery(registry: TerminalRegistry) {
    let mut issuer = TerminalRegistry::new();
    let hex = issuer
        .register("hex", |_: &str, _: usize| Ok(Scanned::new(1)))
        .expect("register");
    let mut parser = Parser::new(&registry, "f");
    let outcome = parser.recover(|p| p.accept(&[hex.into()]));
    assert_eq!(outcome, Err(IntegrityError::UnknownHandle { index: 0 }));
    assert_eq!(parser.last_message(), None);
}

#[rstest]
fn integrity_errors_escape_nested_recovery(mut registry: TerminalRegistry) {
    let greedy = registry
        .register("greedy", |_: &str, _: usize| Ok(Scanned::new(9)))
        .expect("register");
    let mut parser = Parser::new(&registry, "ab");
    let outcome = parser.recover(|outer| {
        outer.recover(|p| p.accept(&[greedy.into()]))?;
        Ok(())
    });
    assert!(matches!(
        outcome,
        Err(IntegrityError::ScannerOverrun { consumed: 9, .. })
    ));
}

#[rstest]
fn last_error_survives_reset_until_cleared(registry: TerminalRegistry) {
    let mut parser = Parser::new(&registry, "x + y");
    assert_eq!(parser.recover(sum), Ok(None));

    parser.reset("x");
    assert_eq!(parser.last_message(), Some("y not found in environment"));
    assert_eq!(parser.recover(sum), Ok(Some(1)));
    assert_eq!(parser.last_message(), Some("y not found in environment"));

    parser.clear_error();
    assert_eq!(parser.last_message(), None);
    assert_eq!(parser.last_error(), None);
}

#[test]
fn raise_converts_into_caller_error_types() {
    #[derive(Debug, PartialEq)]
    struct Wrapped(String);

    impl From<ParseError> for Wrapped {
        fn from(error: ParseError) -> Self {
            Self(error.to_string())
        }
    }

    fn fail(code: u8) -> Result<(), Wrapped> {
        raise!("code {code}");
    }

    assert_eq!(fail(7), Err(Wrapped(String::from("code 7"))));
}
