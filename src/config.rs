//! Runtime configuration sourced from the environment (and `.env`).

use crate::{Result, ToolError};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default OpenWeatherMap current-weather endpoint
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

pub const API_KEY_VAR: &str = "WEATHER_API_KEY";
pub const BASE_URL_VAR: &str = "WEATHER_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "WEATHER_API_TIMEOUT_SECS";

const REDACTED: &str = "***";

/// Weather API key. Never printed, never echoed back to a caller.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Arc::from(key.into()))
    }

    /// Raw key for building the outbound query. Keep it out of logs.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }

    /// Replace every occurrence of the key in `text`.
    pub fn redact(&self, text: &str) -> String {
        if self.0.is_empty() || !text.contains(self.expose()) {
            return text.to_string();
        }
        text.replace(self.expose(), REDACTED)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Settings for the weather lookup tool
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: ApiKey,
    pub base_url: String,
    /// `None` leaves the HTTP client's default in place
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: ApiKey::new(api_key),
            base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the configuration from process environment variables,
    /// loading a `.env` file first when one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ToolError::Config(format!("Missing {API_KEY_VAR} environment variable"))
            })?;

        let mut config = Self::new(api_key.trim());

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|url| !url.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let seconds: u64 = raw.trim().parse().map_err(|_| {
                ToolError::Config(format!(
                    "{TIMEOUT_VAR} must be a whole number of seconds, got {raw:?}"
                ))
            })?;
            config.timeout = Some(Duration::from_secs(seconds));
        }

        Ok(config)
    }
}
