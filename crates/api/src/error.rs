use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use picshelf_core::error::CoreError;
use picshelf_db::store::StoreError;
use serde_json::json;

/// Application-level error type for handlers that do not redirect.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `picshelf_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage directory or metadata store failure.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// The request body exceeded the configured upload limit.
    #[error("Upload exceeds the maximum allowed size")]
    PayloadTooLarge,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, key } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} '{key}' not found"),
                ),
            },
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                internal()
            }
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                self.to_string(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
