//! Tests for logging functionality

use modscope::core::logging::{init_logging, LogFormat};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("Pretty").unwrap(), LogFormat::Pretty);
    assert!(LogFormat::from_str("yaml").is_err());
}

#[test]
fn test_log_format_variants() {
    let variants = LogFormat::variants();
    assert!(variants.contains(&"compact"));
    assert!(variants.contains(&"pretty"));
    assert!(variants.contains(&"json"));
}

#[test]
fn test_init_logging_levels_and_formats() {
    // Only the first call installs a subscriber; the rest must fail gracefully
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("warn"), Some("pretty"));
    let _ = init_logging(Some("off"), Some("json"));
    let _ = init_logging(None, None);
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_generation_with_subscriber_installed() {
    let _ = init_logging(Some("trace"), Some("compact"));
    let snapshot = modscope::Snapshot::new()
        .with_module(modscope::Module::new("sale").with_dependency("ghost"));
    let uml = modscope::package_diagram(&snapshot, "sale").unwrap();
    assert!(uml.contains("as sale <<module>>"));
}
