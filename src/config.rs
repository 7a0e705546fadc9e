use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Where and how to reach the todolists API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            token: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ApiConfig {
    /// Reads `TODOLISTS_API_*` variables, after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let timeout_ms = match non_empty("TODOLISTS_HTTP_TIMEOUT_MS") {
            Some(v) => v.trim().parse::<u64>().with_context(|| format!("TODOLISTS_HTTP_TIMEOUT_MS is not a number: {v}"))?,
            None => DEFAULT_TIMEOUT_MS,
        };
        Ok(Self {
            base_url: non_empty("TODOLISTS_API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: non_empty("TODOLISTS_API_KEY"),
            token: non_empty("TODOLISTS_API_TOKEN"),
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

/// Address the development server listens on.
pub fn bind_addr_from_env() -> Result<SocketAddr> {
    let _ = dotenvy::dotenv();
    let raw = std::env::var("TODOLISTS_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    raw.parse().with_context(|| format!("invalid TODOLISTS_BIND_ADDR: {raw}"))
}
