use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use further_core::AppError;

use crate::dto::ErrorResponse;

/// Wrapper so we can implement `IntoResponse` for `AppError`.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            AppError::DatabaseError(_) => (StatusCode::SERVICE_UNAVAILABLE, "database_error"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        tracing::error!(error.kind = self.0.kind(), error = %self.0, "request failed");

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.0.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub fn not_found() -> Response {
    let body = ErrorResponse {
        error: "not_found".to_string(),
        message: "the requested resource could not be found".to_string(),
    };
    (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
}
