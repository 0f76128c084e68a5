use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use further_core::AppError;

use crate::routes;
use crate::state::Application;

/// Bind `0.0.0.0:<port>` and serve until `shutdown` resolves.
pub async fn serve<F>(app: Arc<Application>, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = SocketAddr::from(([0, 0, 0, 0], app.config.port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::ServingLoopFailure(format!("failed to bind {addr}: {e}")))?;
    serve_on(listener, app, shutdown).await
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve_on<F>(
    listener: TcpListener,
    app: Arc<Application>,
    shutdown: F,
) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::ServingLoopFailure(e.to_string()))?;
    let env = app.config.env;
    let router = routes::router(app)?;

    tracing::info!(addr = %addr, env = %env, "starting server");
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .map_err(|e| AppError::ServingLoopFailure(e.to_string()))?;
    tracing::info!(addr = %addr, "stopped server");

    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
