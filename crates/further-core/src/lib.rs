pub mod config;
pub mod duration;
pub mod error;
pub mod logger;
pub mod mailer;

pub use config::{Config, DatabaseConfig, Environment, LimiterConfig, SmtpConfig};
pub use duration::parse_duration;
pub use error::AppError;
pub use logger::Logger;
pub use mailer::Mailer;

/// Application version reported by `--version` and the health endpoint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
