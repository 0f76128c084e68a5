use std::path::Path;
use std::process::ExitCode;

use further_core::config::load_settings;
use further_core::{AppError, Config, Logger};
use further_server::bootstrap::{self, SETTINGS_FILE};
use further_server::server::shutdown_signal;

#[tokio::main]
async fn main() -> ExitCode {
    let logger = Logger::from_env(std::io::stdout, tracing::Level::INFO);
    if let Err(e) = logger.install() {
        eprintln!("failed to install logger: {e}");
    }

    match run(logger).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let AppError::InvalidFlag(e) = &err
                && let Err(io) = e.print()
            {
                tracing::warn!(error = %io, "failed to print command-line usage");
            }
            if err.is_informational() {
                return ExitCode::SUCCESS;
            }
            tracing::error!(error.kind = err.kind(), error = %err, "fatal");
            ExitCode::FAILURE
        }
    }
}

async fn run(logger: Logger) -> Result<(), AppError> {
    load_settings(Path::new(SETTINGS_FILE))?;
    let config = Config::from_process()?;

    let app = bootstrap::assemble(config, logger).await?;
    bootstrap::run(app, shutdown_signal()).await
}
