//! Configuration management
//!
//! Everything comes from the environment (optionally seeded from `.env`).
//! Missing required values abort startup.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::errors::ConfigError;
use crate::application::services::RetryPolicy;

/// Bot configuration
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub supabase: SupabaseConfig,
    pub admin_chat_id: String,
    pub catalog_path: Option<PathBuf>,
    pub polling: PollingConfig,
    pub notify: RetryPolicy,
}

#[derive(Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub key: String,
    pub orders_table: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    /// getUpdates long-poll timeout
    pub timeout_secs: u64,
    /// Connect/read timeout for ordinary API calls
    pub request_timeout: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &redact_token(&self.bot_token))
            .field("supabase", &self.supabase)
            .field("admin_chat_id", &self.admin_chat_id)
            .field("catalog_path", &self.catalog_path)
            .field("polling", &self.polling)
            .field("notify", &self.notify)
            .finish()
    }
}

impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("key", &"[REDACTED]")
            .field("orders_table", &self.orders_table)
            .finish()
    }
}

/// A `.env` that exists but could not be loaded; a missing one is fine
fn unreadable_dotenv(result: Result<PathBuf, dotenvy::Error>) -> Option<dotenvy::Error> {
    match result {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}

/// First 8 characters of a token, enough to tell bots apart in logs
pub fn redact_token(token: &str) -> String {
    let prefix: String = token.chars().take(8).collect();
    format!("{}...", prefix)
}

impl Config {
    /// Load from process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Some(e) = unreadable_dotenv(dotenvy::dotenv()) {
            tracing::warn!("Ignoring .env: {}", e);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
        };
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let number = |key: &str, default: u64| -> Result<u64, ConfigError> {
            match optional(key) {
                Some(raw) => raw
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string())),
                None => Ok(default),
            }
        };

        let bot_token = required("BOT_TOKEN")?;
        let url = required("SUPABASE_URL")?;
        let key = required("SUPABASE_KEY")?;
        let admin_chat_id = required("ADMIN_CHAT_ID")?;

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "SUPABASE_URL".to_string(),
                "must start with http:// or https://".to_string(),
            ));
        }

        let attempts = number("NOTIFY_ATTEMPTS", u64::from(RetryPolicy::DEFAULT_ATTEMPTS))?;
        if attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "NOTIFY_ATTEMPTS".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let attempts = u32::try_from(attempts)
            .map_err(|e| ConfigError::InvalidValue("NOTIFY_ATTEMPTS".to_string(), e.to_string()))?;
        let delay_ms = number("NOTIFY_RETRY_DELAY_MS", RetryPolicy::DEFAULT_DELAY.as_millis() as u64)?;

        let defaults = PollingConfig::default();
        let polling = PollingConfig {
            timeout_secs: number("POLL_TIMEOUT_SECS", defaults.timeout_secs)?,
            request_timeout: Duration::from_secs(number(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
        };

        Ok(Self {
            bot_token,
            supabase: SupabaseConfig {
                url: url.trim_end_matches('/').to_string(),
                key,
                orders_table: optional("SUPABASE_ORDERS_TABLE").unwrap_or_else(|| "orders".to_string()),
            },
            admin_chat_id,
            catalog_path: optional("CATALOG_PATH").map(PathBuf::from),
            polling,
            notify: RetryPolicy::new(attempts, Duration::from_millis(delay_ms)),
        })
    }
}
