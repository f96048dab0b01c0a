//! Server configuration read from the environment

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::{FixedOffset, Offset, Utc};
use thiserror::Error;

pub const DEFAULT_JWT_SECRET: &str = "dev-jwt-secret-change-me";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_DATA_DIR: &str = ".tasks-data";
const MAX_OFFSET_MINUTES: i32 = 23 * 60 + 59;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    /// Offset in which `date` list filters are compared
    pub filter_offset: FixedOffset,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let data_dir = var("TASKS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let bind_addr = var("TASKS_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "TASKS_BIND_ADDR",
                reason: e.to_string(),
            })?;

        let jwt_secret = var("TASKS_JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());

        let filter_offset = match var("TASKS_FILTER_UTC_OFFSET_MINUTES") {
            Some(raw) => parse_offset(&raw)?,
            None => utc_offset(),
        };

        Ok(Self {
            data_dir,
            bind_addr,
            jwt_secret,
            filter_offset,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}

fn parse_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name: "TASKS_FILTER_UTC_OFFSET_MINUTES",
        reason,
    };

    let minutes: i32 = raw.parse().map_err(|_| invalid(format!("'{}' is not an integer", raw)))?;
    if minutes.abs() > MAX_OFFSET_MINUTES {
        return Err(invalid(format!("{} is out of range", minutes)));
    }
    FixedOffset::east_opt(minutes * 60).ok_or_else(|| invalid(format!("{} is out of range", minutes)))
}
