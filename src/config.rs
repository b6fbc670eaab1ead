//! Ledger configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `LISTEN_ADDR` is set but is not a socket address.
    #[error("invalid LISTEN_ADDR `{value}`: {source}")]
    ListenAddr {
        /// Raw value.
        value: String,
        /// Parser error.
        source: std::net::AddrParseError,
    },

    /// `LEDGER_STORE` names an unknown backend.
    #[error("invalid LEDGER_STORE `{0}` (expected `file` or `memory`)")]
    StoreBackend(String),
}

/// Which [`crate::persistence::KeyValueStore`] backs the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// One JSON file per collection under the data directory.
    File,
    /// Process-local map, lost on exit.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::StoreBackend(s.to_string())),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Top-level ledger configuration.
///
/// Loaded once at startup via [`LedgerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// Storage backend.
    pub store_backend: StoreBackend,

    /// Directory holding the collection files (file backend only).
    pub data_dir: PathBuf,

    /// Fail reads of corrupt collections instead of treating them as empty.
    pub strict_decode: bool,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            store_backend: StoreBackend::File,
            data_dir: PathBuf::from("./ledger-data"),
            strict_decode: false,
            event_bus_capacity: 1024,
            log_format: LogFormat::Text,
        }
    }
}

impl LedgerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file,
    /// then delegates to [`LedgerConfig::from_lookup`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `LISTEN_ADDR` or `LEDGER_STORE` is set
    /// to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Falls back to defaults when a variable is not set. Numeric and
    /// boolean values that fail to parse also fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `LISTEN_ADDR` or `LEDGER_STORE` is set
    /// to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::ListenAddr { value, source })?,
            None => defaults.listen_addr,
        };

        let store_backend = match lookup("LEDGER_STORE") {
            Some(value) => value.parse()?,
            None => defaults.store_backend,
        };

        let data_dir = lookup("LEDGER_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let strict_decode = parse_bool(&lookup, "LEDGER_STRICT_DECODE", defaults.strict_decode);
        let event_bus_capacity = parse_or(&lookup, "EVENT_BUS_CAPACITY", defaults.event_bus_capacity);

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            store_backend,
            data_dir,
            strict_decode,
            event_bus_capacity,
            log_format,
        })
    }
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses a variable as a boolean. Accepts `"true"`, `"1"`, `"false"`,
/// `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}
