//! Runtime Configuration
//!
//! Settings are resolved in three layers: built-in defaults, then `EBOOKS_*`
//! environment variables, then command-line flags. A value that does not parse
//! is a startup error rather than a silent fallback.

use crate::types::DEFAULT_DISPLAY_COUNT;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const ENV_DB: &str = "EBOOKS_DB";
pub const ENV_BIND: &str = "EBOOKS_BIND";
pub const ENV_FETCH_TIMEOUT: &str = "EBOOKS_FETCH_TIMEOUT";
pub const ENV_DISPLAY: &str = "EBOOKS_DISPLAY";
pub const ENV_LOG: &str = "EBOOKS_LOG";

pub const USAGE: &str = "Usage: ebook-frequency [--db <path>] [--bind <addr:port>] \
[--timeout <secs>] [--display <k>] [--in-memory] [--reset]";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },

    #[error("missing value after {0}")]
    MissingValue(String),

    #[error("unknown argument '{0}'")]
    UnknownArgument(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite file holding the frequency table.
    pub db_path: PathBuf,
    /// Address the HTTP façade listens on.
    pub bind_addr: SocketAddr,
    /// Upper bound for a single document download.
    pub fetch_timeout: Duration,
    /// Ranked words returned when a request does not say how many.
    pub default_display_count: usize,
    /// Keep records in memory instead of the SQLite file.
    pub in_memory: bool,
    /// Drop every record before serving.
    pub reset_on_start: bool,
    pub log_level: tracing::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("ebooks.db"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            fetch_timeout: Duration::from_secs(30),
            default_display_count: DEFAULT_DISPLAY_COUNT,
            in_memory: false,
            reset_on_start: false,
            log_level: tracing::Level::INFO,
        }
    }
}

impl AppConfig {
    /// Reads the process environment and the given arguments (without the program name).
    pub fn from_env_and_args(args: &[String]) -> Result<Self, ConfigError> {
        Self::from_sources(|key| std::env::var(key).ok(), args)
    }

    pub fn from_sources<E>(env: E, args: &[String]) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(value) = env(ENV_DB) {
            config.db_path = PathBuf::from(value);
        }
        if let Some(value) = env(ENV_BIND) {
            config.bind_addr = parse_value(ENV_BIND, &value)?;
        }
        if let Some(value) = env(ENV_FETCH_TIMEOUT) {
            config.fetch_timeout = Duration::from_secs(parse_value(ENV_FETCH_TIMEOUT, &value)?);
        }
        if let Some(value) = env(ENV_DISPLAY) {
            config.default_display_count = parse_value(ENV_DISPLAY, &value)?;
        }
        if let Some(value) = env(ENV_LOG) {
            config.log_level = parse_value(ENV_LOG, &value)?;
        }

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--in-memory" => config.in_memory = true,
                "--reset" => config.reset_on_start = true,
                "--db" | "--bind" | "--timeout" | "--display" => {
                    let value = args
                        .get(i + 1)
                        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
                    match flag {
                        "--db" => config.db_path = PathBuf::from(value),
                        "--bind" => config.bind_addr = parse_value(flag, value)?,
                        "--timeout" => {
                            config.fetch_timeout = Duration::from_secs(parse_value(flag, value)?)
                        }
                        _ => config.default_display_count = parse_value(flag, value)?,
                    }
                    i += 1;
                }
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
            i += 1;
        }

        Ok(config)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
