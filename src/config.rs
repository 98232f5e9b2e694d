use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::listing::BrowserMode;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_BASE_URL: &str = "https://allconferencealert.com";
pub const DEFAULT_PAGE_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_BROWSER_POOL_SIZE: usize = 4;
pub const DEFAULT_CSV_DIR: &str = "exports";

#[derive(Debug, Error)]
#[error("Invalid value for {var}: {value:?} ({reason})")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Server settings, read from the environment (after `.env` is loaded)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub base_url: String,
    pub browser_mode: BrowserMode,
    /// Worker (and so browser) count in pooled mode; at least 1
    pub browser_pool_size: usize,
    pub page_timeout: Duration,
    pub idle_browser_timeout: Duration,
    pub sandbox: bool,
    pub csv_output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            browser_mode: BrowserMode::default(),
            browser_pool_size: DEFAULT_BROWSER_POOL_SIZE,
            page_timeout: Duration::from_millis(DEFAULT_PAGE_TIMEOUT_MS),
            idle_browser_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            sandbox: true,
            csv_output_dir: PathBuf::from(DEFAULT_CSV_DIR),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup; unset keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let page_timeout_ms: u64 = parse_var(&lookup, "PAGE_TIMEOUT_MS", DEFAULT_PAGE_TIMEOUT_MS)?;
        let idle_secs: u64 =
            parse_var(&lookup, "BROWSER_IDLE_TIMEOUT_SECS", DEFAULT_IDLE_TIMEOUT_SECS)?;
        let browser_pool_size: usize =
            parse_var(&lookup, "BROWSER_POOL_SIZE", DEFAULT_BROWSER_POOL_SIZE)?;
        if browser_pool_size == 0 {
            return Err(ConfigError {
                var: "BROWSER_POOL_SIZE",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            base_url: lookup("CONFERENCE_BASE_URL").unwrap_or(defaults.base_url),
            browser_mode: parse_var(&lookup, "BROWSER_MODE", defaults.browser_mode)?,
            browser_pool_size,
            page_timeout: Duration::from_millis(page_timeout_ms),
            idle_browser_timeout: Duration::from_secs(idle_secs),
            sandbox: parse_var(&lookup, "BROWSER_SANDBOX", defaults.sandbox)?,
            csv_output_dir: lookup("CSV_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.csv_output_dir),
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
