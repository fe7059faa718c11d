use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use lodgis_core::EngineError;

#[derive(Debug)]
pub enum AppError {
    Engine(EngineError),
    Internal(String),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::Engine(EngineError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION", msg)
            }
            AppError::Engine(EngineError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg)
            }
            AppError::Engine(err @ EngineError::InsufficientInventory { .. }) => {
                (StatusCode::CONFLICT, "INSUFFICIENT_INVENTORY", err.to_string())
            }
            AppError::Engine(err @ EngineError::CapacityExceeded { .. }) => {
                (StatusCode::CONFLICT, "CAPACITY_EXCEEDED", err.to_string())
            }
            AppError::Engine(EngineError::Storage(msg)) => {
                tracing::error!("Storage failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE",
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "kind": kind,
            "error": message,
        }));

        (status, body).into_response()
    }
}
