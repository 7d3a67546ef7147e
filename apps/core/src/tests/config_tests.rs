//! Configuration Tests
//!
//! Environment handling of `AppConfig::from_env`, isolated with temp-env.

use crate::config::{
    AppConfig, LogFormat, ENV_BACKEND_URL, ENV_EXPORT_DIR, ENV_LATENCY_MS, ENV_LOG_FORMAT,
    ENV_SEED_DEMO, ENV_TIMEOUT_SECS,
};
use crate::error::AppError;
use std::path::PathBuf;
use std::time::Duration;

const ALL_VARS: [&str; 6] = [
    ENV_LATENCY_MS,
    ENV_BACKEND_URL,
    ENV_TIMEOUT_SECS,
    ENV_EXPORT_DIR,
    ENV_SEED_DEMO,
    ENV_LOG_FORMAT,
];

/// Runs `f` with only the given variables set among ours.
fn with_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    let kvs: Vec<(&str, Option<&str>)> = ALL_VARS
        .iter()
        .map(|name| {
            let value = vars.iter().find(|(k, _)| k == name).map(|(_, v)| *v);
            (*name, value)
        })
        .collect();
    temp_env::with_vars(kvs, f)
}

#[test]
fn test_defaults() {
    let config = with_env(&[], AppConfig::from_env).unwrap();
    let defaults = AppConfig::default();

    assert_eq!(config.latency_ms, 600);
    assert_eq!(config.latency(), Duration::from_millis(600));
    assert_eq!(config.backend_url, None);
    assert_eq!(config.response_timeout(), Duration::from_secs(30));
    assert_eq!(config.export_dir, defaults.export_dir);
    assert!(config.export_dir.ends_with("data/exports"));
    assert!(config.seed_demo);
    assert_eq!(config.log_format, LogFormat::Pretty);
}

#[test]
fn test_overrides() {
    let config = with_env(
        &[
            (ENV_LATENCY_MS, "0"),
            (ENV_BACKEND_URL, "http://localhost:8080/ask"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_EXPORT_DIR, "/tmp/chathelper"),
            (ENV_SEED_DEMO, "no"),
            (ENV_LOG_FORMAT, "JSON"),
        ],
        AppConfig::from_env,
    )
    .unwrap();

    assert_eq!(config.latency_ms, 0);
    assert_eq!(
        config.backend_url.as_deref(),
        Some("http://localhost:8080/ask")
    );
    assert_eq!(config.response_timeout_secs, 5);
    assert_eq!(config.export_dir, PathBuf::from("/tmp/chathelper"));
    assert!(!config.seed_demo);
    assert_eq!(config.log_format, LogFormat::Json);
}

#[test]
fn test_blank_values_fall_back_to_defaults() {
    let config = with_env(
        &[(ENV_LATENCY_MS, "  "), (ENV_BACKEND_URL, "")],
        AppConfig::from_env,
    )
    .unwrap();
    assert_eq!(config.latency_ms, 600);
    assert_eq!(config.backend_url, None);
}

#[test]
fn test_unparsable_values() {
    let cases = [
        (ENV_LATENCY_MS, "fast"),
        (ENV_TIMEOUT_SECS, "-1"),
        (ENV_SEED_DEMO, "maybe"),
        (ENV_LOG_FORMAT, "xml"),
    ];
    for (name, value) in cases {
        let err = with_env(&[(name, value)], AppConfig::from_env).unwrap_err();
        assert!(
            matches!(err, AppError::Config(_)),
            "{}={} should be a config error, got {:?}",
            name,
            value,
            err
        );
    }
}

#[test]
fn test_out_of_range_values() {
    let cases = [
        (ENV_LATENCY_MS, "60001"),
        (ENV_TIMEOUT_SECS, "0"),
        (ENV_TIMEOUT_SECS, "301"),
        (ENV_BACKEND_URL, "not a url"),
    ];
    for (name, value) in cases {
        let err = with_env(&[(name, value)], AppConfig::from_env).unwrap_err();
        assert!(
            matches!(err, AppError::Validation(_)),
            "{}={} should fail validation, got {:?}",
            name,
            value,
            err
        );
    }
}

#[test]
fn test_demo_latency_must_fit_in_timeout() {
    let err = with_env(&[(ENV_LATENCY_MS, "45000")], AppConfig::from_env).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {:?}", err);

    // Equal to the timeout still fails every ask.
    let err = with_env(
        &[(ENV_LATENCY_MS, "5000"), (ENV_TIMEOUT_SECS, "5")],
        AppConfig::from_env,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {:?}", err);

    let config = with_env(
        &[(ENV_LATENCY_MS, "45000"), (ENV_TIMEOUT_SECS, "60")],
        AppConfig::from_env,
    )
    .unwrap();
    assert_eq!(config.latency_ms, 45000);
}

#[test]
fn test_latency_ignored_with_backend() {
    let config = with_env(
        &[
            (ENV_LATENCY_MS, "45000"),
            (ENV_BACKEND_URL, "http://localhost:8080/ask"),
        ],
        AppConfig::from_env,
    )
    .unwrap();
    assert_eq!(config.latency_ms, 45000);
    assert_eq!(config.response_timeout_secs, 30);
}
