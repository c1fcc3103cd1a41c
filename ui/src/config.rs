use std::path::PathBuf;
use std::time::Duration;

use crate::contexts::toast::DEFAULT_TOAST_DURATION_MS;

pub const DEFAULT_BRIDGE_URL: &str = "http://127.0.0.1:47801";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Front end settings.
///
/// Variables can be set directly or loaded from a `.env` file:
/// - `ENVDESK_BRIDGE_URL`: where the native backend listens
///   (default `http://127.0.0.1:47801`)
/// - `ENVDESK_REQUEST_TIMEOUT_MS`: budget for each resource refresh;
///   `0` disables it (default 30000)
/// - `ENVDESK_TOAST_DURATION_MS`: how long notifications stay up;
///   `0` keeps them until dismissed (default 5000)
/// - `ENVDESK_LOG`: log filter when `RUST_LOG` is unset (default `info`)
/// - `ENVDESK_PREFERENCES_PATH`: where preferences are saved; unset keeps
///   them in memory only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bridge_url: String,
    pub request_timeout: Option<Duration>,
    pub toast_duration_ms: Option<u32>,
    pub log_filter: String,
    pub preferences_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bridge_url: DEFAULT_BRIDGE_URL.to_string(),
            request_timeout: Some(Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS)),
            toast_duration_ms: Some(DEFAULT_TOAST_DURATION_MS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            preferences_path: None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source. Unset or blank variables take their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let request_timeout = match get("ENVDESK_REQUEST_TIMEOUT_MS") {
            Some(value) => match parse_millis("ENVDESK_REQUEST_TIMEOUT_MS", value)? {
                0 => None,
                ms => Some(Duration::from_millis(ms)),
            },
            None => defaults.request_timeout,
        };

        let toast_duration_ms = match get("ENVDESK_TOAST_DURATION_MS") {
            Some(value) => match parse_millis("ENVDESK_TOAST_DURATION_MS", value)? {
                0 => None,
                ms => Some(u32::try_from(ms).unwrap_or(u32::MAX)),
            },
            None => defaults.toast_duration_ms,
        };

        Ok(Self {
            bridge_url: get("ENVDESK_BRIDGE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.bridge_url),
            request_timeout,
            toast_duration_ms,
            log_filter: get("ENVDESK_LOG").unwrap_or(defaults.log_filter),
            preferences_path: get("ENVDESK_PREFERENCES_PATH").map(PathBuf::from),
        })
    }
}

fn parse_millis(var: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value })
}
