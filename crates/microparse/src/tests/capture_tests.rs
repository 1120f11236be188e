//! Tests for capture slots.

use rstest::rstest;

use crate::capture::{CaptureSlot, CaptureValue};
use crate::{Parser, Span, Terminal, TerminalRegistry};

fn word_slot(text: &str) -> CaptureSlot<'_> {
    CaptureSlot::new(
        Terminal::Word,
        Span::new(0, text.len()),
        text,
        CaptureValue::None,
    )
}

#[rstest]
#[case("hello", 3, "hel")]
#[case("hello", 99, "hello")]
#[case("h\u{e9}llo", 2, "h")]
#[case("h\u{e9}llo", 3, "h\u{e9}")]
#[case("", 4, "")]
fn truncated_respects_char_boundaries(
    #[case] text: &str,
    #[case] max: usize,
    #[case] expected: &str,
) {
    assert_eq!(word_slot(text).truncated(max), expected);
}

#[test]
fn integer_capture_records_span_and_value() {
    let registry = TerminalRegistry::new();
    let mut parser = Parser::new(&registry, "  42 ");
    assert!(parser.accept(&[Terminal::Integer]).expect("accept"));

    let slot = parser.capture(0).expect("slot 0");
    assert_eq!(slot.span(), Span::new(2, 2));
    assert_eq!(slot.text(), "42");
    assert_eq!(slot.integer(), Some(42));
    assert_eq!(slot.terminal(), &Terminal::Integer);
}

#[test]
fn quoted_string_capture_excludes_quotes() {
    let registry = TerminalRegistry::new();
    let line = r#""a\"b" x"#;
    let mut parser = Parser::new(&registry, line);
    assert!(parser.accept(&[Terminal::QuotedString]).expect("accept"));

    let slot = parser.capture(0).expect("slot 0");
    assert_eq!(slot.text(), r#"a\"b"#);
    assert_eq!(slot.span(), Span::new(1, 4));
    assert_eq!(parser.rest(), "x");
}

#[test]
fn unmatched_alternatives_leave_empty_slots() {
    let registry = TerminalRegistry::new();
    let mut parser = Parser::new(&registry, "abc");
    assert!(
        parser
            .accept(&[Terminal::Integer, Terminal::Identifier])
            .expect("accept")
    );

    assert_eq!(parser.matched(), Some(1));
    assert!(parser.capture(0).is_none());
    assert_eq!(parser.text(1), Some("abc"));
    assert_eq!(
        parser.matched_capture().map(CaptureSlot::text),
        Some("abc")
    );
    assert_eq!(parser.captures().len(), 2);
}

#[test]
fn each_call_clears_previous_captures() {
    let registry = TerminalRegistry::new();
    let mut parser = Parser::new(&registry, "7 x");
    assert!(parser.accept(&[Terminal::Integer]).expect("first call"));
    assert!(parser.accept(&[Terminal::Identifier]).expect("second call"));

    assert_eq!(parser.integer(0), None);
    assert_eq!(parser.text(0), Some("x"));
}

#[test]
fn text_captures_carry_no_value() {
    let registry = TerminalRegistry::new();
    let mut parser = Parser::new(&registry, "word");
    assert!(parser.accept(&[Terminal::Word]).expect("accept"));
    let slot = parser.capture(0).expect("slot 0");
    assert!(matches!(slot.value(), CaptureValue::None));
    assert_eq!(slot.user_value::<i64>(), None);
}
