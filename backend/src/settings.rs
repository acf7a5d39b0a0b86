//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USERS_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_IDLE: u32 = 2;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
    /// `db_max_connections` must allow at least one connection.
    #[error("db_max_connections must be at least 1")]
    InvalidPoolSize,
}

/// Runtime configuration for the user directory server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS")]
pub struct AppSettings {
    /// PostgreSQL connection string. Without it the server keeps users in
    /// memory.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Maximum pooled connections.
    pub db_max_connections: Option<u32>,
    /// Idle connections kept open.
    pub db_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connect_timeout_secs: Option<u64>,
    /// Apply embedded migrations at startup.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value is not a
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            }
        })
    }

    /// Pool configuration for the configured database, if any.
    ///
    /// The idle count is capped at the connection limit.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidPoolSize`] when `db_max_connections`
    /// is zero.
    pub fn pool_config(&self) -> Result<Option<PoolConfig>, SettingsError> {
        let Some(url) = self.database_url.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if url.is_empty() {
            return Ok(None);
        }
        let max_size = self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS);
        if max_size == 0 {
            return Err(SettingsError::InvalidPoolSize);
        }
        let min_idle = self.db_min_idle.unwrap_or(DEFAULT_MIN_IDLE).min(max_size);
        Ok(Some(
            PoolConfig::new(url)
                .with_max_size(max_size)
                .with_min_idle(Some(min_idle))
                .with_connection_timeout(Duration::from_secs(
                    self.db_connect_timeout_secs
                        .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
                )),
        ))
    }
}
