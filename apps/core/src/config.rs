//! Runtime configuration, read from `CHATHELPER_*` environment variables.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use validator::{Validate, ValidationError};

use crate::error::AppError;
use crate::fs_manager::PortablePathManager;

pub const ENV_LATENCY_MS: &str = "CHATHELPER_LATENCY_MS";
pub const ENV_BACKEND_URL: &str = "CHATHELPER_BACKEND_URL";
pub const ENV_TIMEOUT_SECS: &str = "CHATHELPER_TIMEOUT_SECS";
pub const ENV_EXPORT_DIR: &str = "CHATHELPER_EXPORT_DIR";
pub const ENV_SEED_DEMO: &str = "CHATHELPER_SEED_DEMO";
pub const ENV_LOG_FORMAT: &str = "CHATHELPER_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "{} must be 'pretty' or 'json', got '{}'",
                ENV_LOG_FORMAT, other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_latency_budget"))]
pub struct AppConfig {
    /// Simulated network delay of the demo responder, in milliseconds.
    #[validate(range(max = 60000))]
    pub latency_ms: u64,
    /// When set, questions go to this HTTP endpoint instead of the demo responder.
    #[validate(url)]
    pub backend_url: Option<String>,
    /// Upper bound on a single answer, in seconds.
    #[validate(range(min = 1, max = 300))]
    pub response_timeout_secs: u64,
    /// Where exports and snapshots are written.
    pub export_dir: PathBuf,
    /// Start the session with the two demo exchanges.
    pub seed_demo: bool,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            latency_ms: 600,
            backend_url: None,
            response_timeout_secs: 30,
            export_dir: PortablePathManager::exports_dir(),
            seed_demo: true,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from the process environment and validates it.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let config = Self {
            latency_ms: parse_var(ENV_LATENCY_MS)?.unwrap_or(defaults.latency_ms),
            backend_url: read_var(ENV_BACKEND_URL),
            response_timeout_secs: parse_var(ENV_TIMEOUT_SECS)?
                .unwrap_or(defaults.response_timeout_secs),
            export_dir: read_var(ENV_EXPORT_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            seed_demo: match read_var(ENV_SEED_DEMO) {
                Some(raw) => parse_bool(ENV_SEED_DEMO, &raw)?,
                None => defaults.seed_demo,
            },
            log_format: match read_var(ENV_LOG_FORMAT) {
                Some(raw) => raw.parse()?,
                None => defaults.log_format,
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_secs(self.response_timeout_secs)
    }
}

/// The demo responder must be able to answer before the response timeout fires.
fn validate_latency_budget(config: &AppConfig) -> Result<(), ValidationError> {
    if config.backend_url.is_none() && config.latency() >= config.response_timeout() {
        let mut error = ValidationError::new("latency_exceeds_timeout");
        error.message = Some(Cow::from(format!(
            "{}={} must be below {}={}s",
            ENV_LATENCY_MS, config.latency_ms, ENV_TIMEOUT_SECS, config.response_timeout_secs
        )));
        return Err(error);
    }
    Ok(())
}

/// Unset and blank variables are both treated as absent.
fn read_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError>
where
    T::Err: std::fmt::Display,
{
    read_var(name)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| AppError::Config(format!("{}='{}': {}", name, raw, e)))
        })
        .transpose()
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!(
            "{}='{}': expected true or false",
            name, raw
        ))),
    }
}
