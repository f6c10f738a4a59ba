use std::time::Duration;

use anyhow::{Context, Result};

use crate::layout::PaperSize;

const DEFAULT_HINT_TIMEOUT_SECS: u64 = 20;

/// Application configuration loaded from environment variables.
/// Every variable is optional; without `ANTHROPIC_API_KEY` the service classifies
/// heuristically only.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Deadline for the whole structuring-hint call, retries included.
    pub hint_timeout: Duration,
    pub page_size: PaperSize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            port: 8080,
            rust_log: "info".to_string(),
            hint_timeout: Duration::from_secs(DEFAULT_HINT_TIMEOUT_SECS),
            page_size: PaperSize::Letter,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        Ok(Config {
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            port: match get("PORT") {
                Some(v) => v.parse::<u16>().context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
            hint_timeout: match get("HINT_TIMEOUT_SECS") {
                Some(v) => Duration::from_secs(
                    v.parse::<u64>()
                        .context("HINT_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                None => defaults.hint_timeout,
            },
            page_size: match get("PAGE_SIZE") {
                Some(v) => v
                    .parse::<PaperSize>()
                    .map_err(anyhow::Error::msg)
                    .context("PAGE_SIZE must be letter or a4")?,
                None => defaults.page_size,
            },
        })
    }
}
