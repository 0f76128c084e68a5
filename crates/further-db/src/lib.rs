pub mod config;
pub mod database;
pub mod models;
pub mod probe;

pub use config::{PoolSettings, UNLIMITED_MAX_CONNECTIONS};
pub use database::Database;
pub use models::Models;
pub use probe::{PROBE_TIMEOUT, PingProbe, Probe};
