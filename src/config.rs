//! Gateway configuration.
//!
//! Values come from (lowest to highest precedence) built-in defaults, a
//! `.env` file, process environment variables, then CLI flags applied by
//! `app`.

use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_RATE_URL: &str = "https://api.exchangerate.host/latest";
pub const DEFAULT_TRANSLATE_URL: &str = "https://libretranslate.com/translate";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

pub const ENV_RATE_URL: &str = "FQ_RATE_URL";
pub const ENV_RATE_ACCESS_KEY: &str = "FQ_RATE_ACCESS_KEY";
pub const ENV_TRANSLATE_URL: &str = "FQ_TRANSLATE_URL";
pub const ENV_TRANSLATE_API_KEY: &str = "FQ_TRANSLATE_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "FQ_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub rate_url: String,
    pub rate_access_key: Option<String>,
    pub translate_url: String,
    pub translate_api_key: Option<String>,
    /// Upper bound for a single HTTP request (connect + body).
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            rate_url: DEFAULT_RATE_URL.to_string(),
            rate_access_key: None,
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            translate_api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    /// Load from `.env` and the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::default();
        if let Some(url) = get(ENV_RATE_URL) {
            config.rate_url = url;
        }
        if let Some(url) = get(ENV_TRANSLATE_URL) {
            config.translate_url = url;
        }
        config.rate_access_key = get(ENV_RATE_ACCESS_KEY);
        config.translate_api_key = get(ENV_TRANSLATE_API_KEY);
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            config.timeout = parse_timeout_secs(&raw)?;
        }
        Ok(config)
    }
}

/// Parse a whole number of seconds (>= 1).
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, AppError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AppError::new(
            2,
            format!("Invalid {ENV_TIMEOUT_SECS} '{raw}': expected a whole number of seconds >= 1."),
        )),
    }
}
