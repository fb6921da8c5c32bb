use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller-supplied data is empty or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A model failed to initialise at startup.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            AppError::InvalidInput(msg) => ("INVALID_INPUT", msg.clone()),
            AppError::ModelUnavailable(msg) => {
                tracing::error!("Model unavailable: {msg}");
                ("MODEL_UNAVAILABLE", msg.clone())
            }
            AppError::Processing(msg) => {
                tracing::error!("Processing error: {msg}");
                ("PROCESSING_ERROR", format!("Error processing request: {msg}"))
            }
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                ("GENERATION_ERROR", format!("Error generating text: {msg}"))
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (self.status(), body).into_response()
    }
}
