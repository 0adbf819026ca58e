//! Unified error handling for the registry API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use haft_registry::{RegistryError, StoreError};
use serde::Serialize;

/// API error response body.
#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

/// Application error types.
pub enum AppError {
    /// The registry found zero or multiple winners for a single-plugin
    /// query; the request is aborted rather than guessed at.
    Consistency(String),
    /// Record store failure.
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Consistency(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONSISTENCY_ERROR", msg)
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        (
            status,
            Json(ApiError {
                error: message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        tracing::error!("registry consistency error: {err}");
        AppError::Consistency(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::error!("record store error: {err}");
        AppError::Internal(err.to_string())
    }
}
