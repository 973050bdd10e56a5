//! Configuration loading and representation.
//!
//! All settings come from environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `INVOICEDESK_BIND` | `0.0.0.0:8080` | HTTP listen address |
//! | `DATABASE_URL` | unset | Postgres URL; unset selects the in-memory store |
//! | `DATABASE_MAX_CONNECTIONS` | `5` | Pool size |
//! | `DATABASE_ACQUIRE_TIMEOUT_SECS` | `5` | Seconds to wait for a pooled connection |

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind: SocketAddr,
    /// `None` runs against the in-memory store.
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("INVOICEDESK_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = parse("INVOICEDESK_BIND", &bind_raw)?;

        let database = match get("DATABASE_URL") {
            None => None,
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: get("DATABASE_MAX_CONNECTIONS")
                    .map(|v| parse("DATABASE_MAX_CONNECTIONS", &v))
                    .transpose()?
                    .unwrap_or(DEFAULT_MAX_CONNECTIONS),
                acquire_timeout_secs: get("DATABASE_ACQUIRE_TIMEOUT_SECS")
                    .map(|v| parse("DATABASE_ACQUIRE_TIMEOUT_SECS", &v))
                    .transpose()?
                    .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            }),
        };

        Ok(Self { bind, database })
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
