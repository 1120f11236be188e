//! Tests for [`EngineConfig`].

use crate::{EngineConfig, Parser, Terminal, TerminalRegistry};

#[test]
fn default_config_has_expected_values() {
    let config = EngineConfig::default();
    assert_eq!(config.max_user_terminals(), 6);
    assert_eq!(config.max_captures(), 10);
}

#[test]
fn custom_config_construction() {
    let config = EngineConfig::new(2, 3);
    assert_eq!(config.max_user_terminals(), 2);
    assert_eq!(config.max_captures(), 3);
}

#[test]
fn missing_fields_deserialize_to_defaults() {
    let config: EngineConfig =
        serde_json::from_str(r#"{"max_captures": 4}"#).expect("deserialize config");
    assert_eq!(config, EngineConfig::new(6, 4));

    let empty: EngineConfig = serde_json::from_str("{}").expect("deserialize empty config");
    assert_eq!(empty, EngineConfig::default());
}

#[test]
fn registry_capacity_follows_config() {
    let registry = TerminalRegistry::with_config(&EngineConfig::new(1, 10));
    assert_eq!(registry.capacity(), 1);
}

#[test]
fn parser_capture_capacity_follows_config() {
    let registry = TerminalRegistry::new();
    let config = EngineConfig::new(6, 1);
    let mut parser = Parser::with_config(&registry, "a b", &config);
    assert!(parser.accept(&[Terminal::Identifier]).expect("one terminal fits"));
    assert!(
        parser
            .accept_all(&[Terminal::Identifier, Terminal::EndOfInput])
            .is_err()
    );
}
