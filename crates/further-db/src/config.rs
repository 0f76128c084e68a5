use std::str::FromStr;
use std::time::Duration;

use further_core::{AppError, DatabaseConfig, parse_duration};
use sqlx::postgres::PgConnectOptions;

/// Open-connection bound used when `max_open_conns` is 0 (unlimited).
///
/// sqlx sizes its idle queue up front from the open bound, so "unlimited"
/// has to be a finite, allocatable ceiling. Far above what a Postgres server
/// accepts by default.
pub const UNLIMITED_MAX_CONNECTIONS: u32 = 10_000;

/// Validated pool shape, derived from a [`DatabaseConfig`].
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub connect_options: PgConnectOptions,
    /// Open-connection bound handed to the pool; never zero.
    pub max_connections: u32,
    pub max_idle: u32,
    /// `None` keeps idle connections until they are reused or closed.
    pub idle_timeout: Option<Duration>,
}

impl PoolSettings {
    /// Validate the connection string and parse the idle time.
    ///
    /// The connection string is checked first; no connection is attempted.
    /// An empty string falls back to the libpq defaults (`PGHOST`, `PGPORT`,
    /// `PGUSER` and friends, else localhost).
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, AppError> {
        let connect_options = if config.dsn.is_empty() {
            PgConnectOptions::new()
        } else {
            PgConnectOptions::from_str(&config.dsn)
                .map_err(|e| AppError::InvalidDriverConfiguration(e.to_string()))?
        };

        let idle_time = parse_duration(&config.max_idle_time)?;

        let max_connections = match config.max_open_conns {
            0 => UNLIMITED_MAX_CONNECTIONS,
            n => n,
        };

        Ok(Self {
            connect_options,
            max_connections,
            max_idle: config.max_idle_conns,
            idle_timeout: (!idle_time.is_zero()).then_some(idle_time),
        })
    }

    /// Returns true if the idle bound can ever be reached.
    ///
    /// A pool never holds more idle connections than open ones, so an idle
    /// bound at or above the open bound has no effect.
    pub fn caps_idle(&self) -> bool {
        self.max_idle < self.max_connections
    }
}
