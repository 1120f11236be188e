//! Tests for [`Terminal`] descriptors.

use rstest::rstest;

use crate::{Terminal, TerminalRegistry};

#[rstest]
#[case(Terminal::EndOfInput, "<end of line>")]
#[case(Terminal::QuotedString, "<quoted string>")]
#[case(Terminal::Identifier, "<identifier>")]
#[case(Terminal::IdentifierWithWildcard, "<identifier+glob>")]
#[case(Terminal::Integer, "<integer>")]
#[case(Terminal::Word, "<word>")]
#[case(Terminal::literal("("), "\"(\"")]
fn terminals_display_by_kind(#[case] terminal: Terminal, #[case] expected: &str) {
    assert_eq!(terminal.to_string(), expected);
}

#[test]
fn literal_conversions_agree() {
    let borrowed = Terminal::from("min");
    let owned = Terminal::from(String::from("min"));
    assert_eq!(borrowed, owned);
    assert!(borrowed.is_literal());
    assert_eq!(borrowed.builtin_name(), None);
}

#[test]
fn handles_convert_to_user_terminals() {
    let mut registry = TerminalRegistry::new();
    let handle = registry
        .register("hex", |_: &str, _: usize| Ok(crate::Scanned::none()))
        .expect("register");
    let terminal = Terminal::from(handle);
    assert_eq!(terminal, Terminal::User(handle));
    assert!(!terminal.is_literal());
    assert_eq!(terminal.to_string(), "<user terminal #0>");
}

#[test]
fn literal_spelling_a_builtin_name_stays_literal() {
    let terminal = Terminal::literal("integer");
    assert_ne!(terminal, Terminal::Integer);
    assert_eq!(terminal.builtin_name(), None);
}
