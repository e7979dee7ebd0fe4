use std::time::Duration;

use anyhow::{Context, Result};

use crate::api::mock::DEFAULT_MOCK_DELAY;

/// Which backend the API client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiMode {
    Mock,
    Live { base_url: String },
}

impl ApiMode {
    /// Mock when explicitly requested with `"true"`, and always when no
    /// usable base URL is configured.
    pub fn resolve(use_mock: Option<&str>, base_url: Option<&str>) -> Self {
        let base_url = base_url.map(str::trim).filter(|url| !url.is_empty());
        match (use_mock, base_url) {
            (Some("true"), _) | (_, None) => ApiMode::Mock,
            (_, Some(url)) => ApiMode::Live {
                base_url: url.to_string(),
            },
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, ApiMode::Mock)
    }
}

/// Everything the API client needs, passed in at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub mode: ApiMode,
    pub mock_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mode: ApiMode::Mock,
            mock_delay: DEFAULT_MOCK_DELAY,
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_mode: ApiMode,
    pub mock_delay: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let use_mock = std::env::var("USE_MOCK").ok();
        let base_url = std::env::var("API_URL").ok();

        Ok(Config {
            api_mode: ApiMode::resolve(use_mock.as_deref(), base_url.as_deref()),
            mock_delay: match std::env::var("MOCK_DELAY_MS") {
                Ok(ms) => Duration::from_millis(
                    ms.parse::<u64>()
                        .context("MOCK_DELAY_MS must be a whole number of milliseconds")?,
                ),
                Err(_) => DEFAULT_MOCK_DELAY,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            mode: self.api_mode.clone(),
            mock_delay: self.mock_delay,
        }
    }
}
