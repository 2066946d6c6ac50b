//! Environment configuration.
//!
//! Every setting has a default. Unset or empty variables use it silently;
//! values that fail to parse use it with a warning.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid listen address {addr}: {source}")]
    InvalidListenAddr {
        addr: String,
        #[source]
        source: AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub migrations_dir: PathBuf,
    pub db_readers: usize,
    pub request_timeout: Duration,
    pub shutdown_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            host: "0.0.0.0".into(),
            port: 8080,
            db_path: "zyntra.db".into(),
            migrations_dir: "migrations".into(),
            db_readers: 4,
            request_timeout: Duration::from_secs(15),
            shutdown_timeout: Duration::from_secs(15),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            environment: get("ZYNTRA_ENV").unwrap_or(defaults.environment),
            host: get("ZYNTRA_HOST").unwrap_or(defaults.host),
            port: parsed(&get, "ZYNTRA_PORT", defaults.port),
            db_path: get("ZYNTRA_DB_PATH").map_or(defaults.db_path, PathBuf::from),
            migrations_dir: get("ZYNTRA_MIGRATIONS_DIR").map_or(defaults.migrations_dir, PathBuf::from),
            db_readers: parsed(&get, "ZYNTRA_DB_READERS", defaults.db_readers).max(1),
            request_timeout: duration(&get, "ZYNTRA_REQUEST_TIMEOUT", defaults.request_timeout),
            shutdown_timeout: duration(&get, "ZYNTRA_SHUTDOWN_TIMEOUT", defaults.shutdown_timeout),
        }
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|source| ConfigError::InvalidListenAddr { addr, source })
    }
}

fn parsed<T, G>(get: &G, key: &str, fallback: T) -> T
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => fallback,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{key}={raw:?} is not valid, using default");
            fallback
        }),
    }
}

fn duration<G>(get: &G, key: &str, fallback: Duration) -> Duration
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => fallback,
        Some(raw) => parse_duration(&raw).unwrap_or_else(|| {
            warn!("{key}={raw:?} is not a valid duration, using default");
            fallback
        }),
    }
}

/// Parses durations like `15s`, `250ms`, `1m30s` or `2h`. A bare `0` is zero.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    if raw == "0" {
        return Some(Duration::ZERO);
    }

    let mut total = Duration::ZERO;
    let mut rest = raw;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            return None;
        }
        let value: u64 = rest[..digits].parse().ok()?;
        rest = &rest[digits..];

        let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let term = match &rest[..unit_len] {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(value.checked_mul(60)?),
            "h" => Duration::from_secs(value.checked_mul(3600)?),
            _ => return None,
        };
        total = total.checked_add(term)?;
        rest = &rest[unit_len..];
    }

    if raw.is_empty() { None } else { Some(total) }
}
