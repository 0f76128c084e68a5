use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Application-wide error types for the API bootstrap.
#[derive(Error, Debug)]
pub enum AppError {
    /// The settings file could not be loaded. Raised before flags are parsed.
    #[error("Failed to load settings file {}: {reason}", path.display())]
    MissingSettingsSource { path: PathBuf, reason: String },

    /// Command-line flags were malformed, or help/version output was requested.
    #[error("{0}")]
    InvalidFlag(#[from] clap::Error),

    /// The connection string was rejected by the driver.
    #[error("Invalid database configuration: {0}")]
    InvalidDriverConfiguration(String),

    /// A duration string did not parse.
    #[error("Invalid duration '{value}': {reason}")]
    InvalidDurationFormat { value: String, reason: String },

    /// The liveness probe did not finish before its deadline.
    #[error("Database probe timed out after {} seconds", .0.as_secs())]
    ProbeTimeout(Duration),

    /// The liveness probe reached the database and failed.
    #[error("Database probe failed: {0}")]
    ProbeConnectivityFailure(String),

    /// The HTTP serving loop returned an error.
    #[error("Server error: {0}")]
    ServingLoopFailure(String),

    /// Database operation failed after startup.
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AppError {
    /// Stable tag used as the `error.kind` field in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingSettingsSource { .. } => "missing_settings_source",
            AppError::InvalidFlag(_) => "invalid_flag",
            AppError::InvalidDriverConfiguration(_) => "invalid_driver_configuration",
            AppError::InvalidDurationFormat { .. } => "invalid_duration_format",
            AppError::ProbeTimeout(_) => "probe_timeout",
            AppError::ProbeConnectivityFailure(_) => "probe_connectivity_failure",
            AppError::ServingLoopFailure(_) => "serving_loop_failure",
            AppError::DatabaseError(_) => "database_error",
        }
    }

    /// Returns true if clap produced help or version text rather than a failure.
    pub fn is_informational(&self) -> bool {
        match self {
            AppError::InvalidFlag(e) => matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ),
            _ => false,
        }
    }
}
