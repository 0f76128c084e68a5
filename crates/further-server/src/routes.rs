use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use further_core::{AppError, VERSION};

use crate::dto::{HealthResponse, SystemInfo};
use crate::error::{ApiError, not_found};
use crate::limiter;
use crate::state::Application;

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Build the full router with all routes and middleware.
pub fn router(app: Arc<Application>) -> Result<Router, AppError> {
    let limiter_config = app.config.limiter.clone();

    let routes = Router::new()
        .route("/v1/healthcheck", get(healthcheck))
        .fallback(|| async { not_found() })
        .with_state(app);

    let routes = limiter::apply(routes, &limiter_config)?;

    Ok(routes
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http()))
}

/// Report availability, environment and version.
pub async fn healthcheck(
    State(app): State<Arc<Application>>,
) -> Result<impl IntoResponse, ApiError> {
    app.models.health_check().await?;

    let response = HealthResponse {
        status: "available",
        system_info: SystemInfo {
            environment: app.config.env.to_string(),
            version: VERSION,
        },
    };

    Ok(axum::Json(response))
}
