use anyhow::{bail, Context};
use axum::http::HeaderValue;
use std::{net::SocketAddr, time::Duration};
use stockledger_core::constants::DEFAULT_LEDGER_CACHE_CAPACITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// `None` leaves the ledger cache off.
    pub ledger_cache_capacity: Option<usize>,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: "./db/stockledger.db".into(),
            cors_allow: vec!["*".into()],
            request_timeout: Duration::from_millis(30000),
            ledger_cache_capacity: None,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, falling back to defaults for
    /// unset variables. Unparsable values are an error.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(addr) = lookup("SL_LISTEN_ADDR") {
            config.listen_addr = addr
                .parse()
                .with_context(|| format!("Invalid SL_LISTEN_ADDR: {}", addr))?;
        }
        if let Some(db_path) = lookup("SL_DB_PATH") {
            config.db_path = db_path;
        }
        if let Some(origins) = lookup("SL_CORS_ALLOW_ORIGINS") {
            config.cors_allow = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            for origin in config.cors_allow.iter().filter(|o| *o != "*") {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {}", origin))?;
            }
        }
        if let Some(timeout) = lookup("SL_REQUEST_TIMEOUT_MS") {
            let timeout_ms: u64 = timeout
                .parse()
                .with_context(|| format!("Invalid SL_REQUEST_TIMEOUT_MS: {}", timeout))?;
            config.request_timeout = Duration::from_millis(timeout_ms);
        }

        let cache_enabled = match lookup("SL_LEDGER_CACHE") {
            Some(flag) => parse_flag(&flag)
                .with_context(|| format!("Invalid SL_LEDGER_CACHE: {}", flag))?,
            None => false,
        };
        if cache_enabled {
            let capacity = match lookup("SL_LEDGER_CACHE_CAPACITY") {
                Some(raw) => raw
                    .parse()
                    .with_context(|| format!("Invalid SL_LEDGER_CACHE_CAPACITY: {}", raw))?,
                None => DEFAULT_LEDGER_CACHE_CAPACITY,
            };
            if capacity == 0 {
                bail!("SL_LEDGER_CACHE_CAPACITY must be at least 1");
            }
            config.ledger_cache_capacity = Some(capacity);
        }

        if let Some(format) = lookup("SL_LOG_FORMAT") {
            config.log_format = match format.to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => bail!("Invalid SL_LOG_FORMAT: {} (expected text or json)", format),
            };
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("expected a boolean"),
    }
}
