//! Startup sequence.
//!
//! Configuration is resolved, the pool is opened and probed, and only then is
//! the [`Application`] assembled. Any failure stops the sequence and is
//! returned to the caller; nothing here exits the process.

use std::future::Future;
use std::sync::Arc;

use tracing::instrument::WithSubscriber;

use further_core::{AppError, Config, Logger};
use further_db::Database;

use crate::limiter;
use crate::server;
use crate::state::Application;

/// Settings file loaded from the working directory before flags are parsed.
pub const SETTINGS_FILE: &str = ".env";

/// Open the database described by `config` and assemble the application.
///
/// Limiter settings are checked first so a bad limiter never opens a pool.
pub async fn assemble(config: Config, logger: Logger) -> Result<Application, AppError> {
    limiter::validate(&config.limiter)?;
    let db = Database::open(&config.db).await?;

    tracing::dispatcher::with_default(logger.dispatch(), || {
        tracing::info!(
            max_open_conns = config.db.max_open_conns,
            max_idle_conns = config.db.max_idle_conns,
            max_idle_time = %config.db.max_idle_time,
            "database connection pool established"
        );
    });

    Ok(Application::assemble(Arc::new(config), db, logger))
}

/// Serve `app` until `shutdown` resolves, then close the pool.
///
/// The pool is closed whether the serving loop ended cleanly or with an error.
pub async fn run<F>(app: Application, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db = app.db.clone();
    let dispatch = app.logger.dispatch().clone();

    let served = server::serve(Arc::new(app), shutdown)
        .with_subscriber(dispatch.clone())
        .await;

    db.close().await;
    tracing::dispatcher::with_default(&dispatch, || {
        tracing::info!("database connection pool closed");
    });

    served
}
