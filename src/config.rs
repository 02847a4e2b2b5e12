use std::path::PathBuf;

use crate::error::{AppError, Result};

pub const BASE_URL: &str = "https://tejaratnews.com/";

/// Desktop browser identity; the site rejects default client identifiers.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Total per-request timeout (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Redirect hops followed before a fetch is treated as failed.
pub const MAX_REDIRECTS: usize = 10;

/// Every listed price is quoted in Toman.
pub const PRICE_UNIT: &str = "تومان";

/// Prefix of the per-currency error message ("error receiving data: ").
pub const FETCH_ERROR_PREFIX: &str = "خطا در دریافت داده‌ها: ";

/// Generic top-level failure message ("the server encountered an error").
pub const SERVER_ERROR_MESSAGE: &str = "سرور با خطا مواجه شد";

/// `updated` timestamp layout, local wall clock.
pub const UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct Config {
    /// Origin the registry path segments are joined to (SCRAPER_BASE_URL)
    pub base_url: String,
    /// Total per-request timeout in seconds (SCRAPER_TIMEOUT_SECS)
    pub timeout_secs: u64,
    /// Write the report here instead of stdout (SCRAPER_OUTPUT)
    pub output_path: Option<PathBuf>,
    /// Exit non-zero when the report is `ok: false` (SCRAPER_STRICT_EXIT)
    pub strict_exit: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
            output_path: None,
            strict_exit: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup("SCRAPER_TIMEOUT_SECS") {
            Some(v) => v.trim().parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                AppError::Config("SCRAPER_TIMEOUT_SECS must be a positive integer".to_string())
            })?,
            None => REQUEST_TIMEOUT_SECS,
        };

        let strict_exit = match lookup("SCRAPER_STRICT_EXIT") {
            Some(v) => parse_flag(&v).ok_or_else(|| {
                AppError::Config("SCRAPER_STRICT_EXIT must be true/false/1/0".to_string())
            })?,
            None => false,
        };

        Ok(Self {
            base_url: lookup("SCRAPER_BASE_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| BASE_URL.to_string()),
            timeout_secs,
            output_path: lookup("SCRAPER_OUTPUT")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            strict_exit,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
