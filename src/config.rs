//! Server configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 15;
pub const DEFAULT_IDLE_THRESHOLD_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown STORE_BACKEND: {0} (expected `postgres` or `memory`)")]
    UnknownBackend(String),
    #[error("DATABASE_URL is required for the postgres backend")]
    MissingDatabaseUrl,
    #[error("SWEEP_INTERVAL_SECS must be at least 1")]
    ZeroSweepInterval,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub port: u16,
    pub backend: StoreBackend,
    /// How often the idle sweep runs.
    pub sweep_interval: Duration,
    /// Idle time after which a participant is evicted.
    pub idle_threshold: Duration,
    /// Append join/leave notices to the message log.
    pub announce_presence: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            backend: StoreBackend::Memory,
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            idle_threshold: Duration::from_secs(DEFAULT_IDLE_THRESHOLD_SECS),
            announce_presence: false,
        }
    }
}

impl ChatConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 5000
    /// - `STORE_BACKEND`: `postgres` (default) or `memory`
    /// - `DATABASE_URL`: required for `postgres`
    /// - `SWEEP_INTERVAL_SECS`: default 15
    /// - `IDLE_THRESHOLD_SECS`: default 10
    /// - `ANNOUNCE_PRESENCE`: default false
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown backend, a missing database URL, or a
    /// zero sweep interval.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = parse_backend(
            std::env::var("STORE_BACKEND").ok().as_deref(),
            std::env::var("DATABASE_URL").ok(),
        )?;

        Ok(Self {
            port: env_parse("PORT", DEFAULT_PORT),
            backend,
            sweep_interval: parse_sweep_interval(env_parse("SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS))?,
            idle_threshold: Duration::from_secs(env_parse("IDLE_THRESHOLD_SECS", DEFAULT_IDLE_THRESHOLD_SECS)),
            announce_presence: env_bool("ANNOUNCE_PRESENCE").unwrap_or(false),
        })
    }
}

pub(crate) fn parse_backend(raw: Option<&str>, database_url: Option<String>) -> Result<StoreBackend, ConfigError> {
    match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("" | "postgres" | "pg") => {
            let database_url = database_url
                .filter(|url| !url.trim().is_empty())
                .ok_or(ConfigError::MissingDatabaseUrl)?;
            Ok(StoreBackend::Postgres { database_url })
        }
        Some("memory" | "mem") => Ok(StoreBackend::Memory),
        Some(other) => Err(ConfigError::UnknownBackend(other.to_owned())),
    }
}

pub(crate) fn parse_sweep_interval(secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::ZeroSweepInterval);
    }
    Ok(Duration::from_secs(secs))
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
