use std::time::Duration;

use crate::errors::AppError;

pub const DEFAULT_API_URL: &str = "http://localhost:4000/api/audit/logs";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";
pub const DEFAULT_TITLE: &str = "CareSync Blockchain Audit Logs";

/// Runtime configuration, resolved once at start-up.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub fetch_timeout: Duration,
    pub bind_addr: String,
    pub title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let api_url = get("AUDIT_API_URL").unwrap_or(defaults.api_url);
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "AUDIT_API_URL must be an http(s) URL, got '{api_url}'"
            )));
        }

        let fetch_timeout = match get("AUDIT_FETCH_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AppError::Config(format!(
                        "AUDIT_FETCH_TIMEOUT_SECS must be a positive integer, got '{raw}'"
                    )));
                }
            },
            None => defaults.fetch_timeout,
        };

        Ok(Self {
            api_url,
            fetch_timeout,
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            title: get("APP_TITLE").unwrap_or(defaults.title),
        })
    }
}
