use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::candidates::list::PAGE_SIZE_OPTIONS;

/// Console configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub http_timeout: Duration,
    pub search_debounce: Duration,
    pub default_page_size: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_page_size = parse_env("DEFAULT_PAGE_SIZE", 10u32)?;
        if !PAGE_SIZE_OPTIONS.contains(&default_page_size) {
            bail!("DEFAULT_PAGE_SIZE must be one of {PAGE_SIZE_OPTIONS:?}, got {default_page_size}");
        }

        Ok(Config {
            api_url: require_env("TALENT_API_URL")?,
            username: std::env::var("TALENT_USERNAME").ok(),
            password: std::env::var("TALENT_PASSWORD").ok(),
            http_timeout: Duration::from_secs(parse_env("HTTP_TIMEOUT_SECS", 30)?),
            search_debounce: Duration::from_millis(parse_env("SEARCH_DEBOUNCE_MS", 500)?),
            default_page_size,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
