//! Configuration loading tests.

use chatgate::{ChatgateConfig, ChatgateErrorKind};
use std::io::Write;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_defaults_mirror_bundled_file() {
    let config = ChatgateConfig::from_toml_str("").unwrap();

    assert_eq!(config.auth().secret_env(), "CHATGATE_JWT_SECRET");
    assert_eq!(config.rate_limit().window(), Duration::from_secs(10));
    assert_eq!(config.retry().initial_delay(), Duration::from_secs(10));
    assert!(*config.cache().enabled());
    assert_eq!(config.model().parameters().model_id(), "anthropic.claude-3-sonnet-20240229-v1:0");
    assert!(config.model().prompt_template().as_str().contains("{message}"));
}

#[test]
fn test_file_overrides_only_named_keys() {
    let file = write_config(
        r#"
        [rate_limit]
        limit = 5

        [cache]
        enabled = false
        "#,
    );

    let config = ChatgateConfig::from_file(file.path()).unwrap();

    assert_eq!(*config.rate_limit().limit(), 5);
    assert_eq!(*config.rate_limit().window_secs(), 10);
    assert!(!*config.cache().enabled());
    assert_eq!(*config.cache().max_size(), 100);
    assert_eq!(*config.retry().max_retries(), 3);
}

#[test]
fn test_model_endpoint_from_file() {
    let file = write_config(
        r#"
        [model]
        endpoint = "http://127.0.0.1:9000/invoke"
        timeout_secs = 5
        "#,
    );

    let config = ChatgateConfig::from_file(file.path()).unwrap();

    assert_eq!(
        config.model().endpoint().as_deref(),
        Some("http://127.0.0.1:9000/invoke")
    );
    assert_eq!(config.model().timeout(), Duration::from_secs(5));
}

#[test]
fn test_zero_window_rejected() {
    let err = ChatgateConfig::from_toml_str("[rate_limit]\nwindow_secs = 0\n").unwrap_err();
    assert!(matches!(err.kind(), ChatgateErrorKind::Config(_)));
}

#[test]
fn test_zero_limit_rejected() {
    assert!(ChatgateConfig::from_toml_str("[rate_limit]\nlimit = 0\n").is_err());
}

#[test]
fn test_template_without_slot_rejected() {
    let err = ChatgateConfig::from_toml_str("[model]\nprompt_template = \"no slot here\"\n")
        .unwrap_err();
    assert!(err.to_string().contains("{message}"));
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(ChatgateConfig::from_file(&missing).is_err());
}

#[test]
fn test_malformed_toml_is_error() {
    let file = write_config("[rate_limit\nlimit = ");
    let err = ChatgateConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err.kind(), ChatgateErrorKind::Config(_)));
}

#[test]
fn test_to_toml_reloads_identically() {
    let original = ChatgateConfig::from_toml_str("[retry]\nmax_retries = 1\n").unwrap();
    let rendered = original.to_toml().unwrap();

    assert!(rendered.contains("[rate_limit]"));
    let reloaded = ChatgateConfig::from_toml_str(&rendered).unwrap();
    assert_eq!(reloaded, original);
}
