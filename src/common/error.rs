// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Application error type, with `thiserror` for ergonomics.
// Every domain guard failure carries the specific human-readable message
// the handlers return verbatim to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    // A status transition was requested from the wrong origin state.
    #[error("{0}")]
    InvalidTransition(String),

    // A transition's precondition (start date, initial quantity) is unmet.
    #[error("{0}")]
    MissingPrecondition(String),

    // A deduction (slaughter, live sale, portioning) exceeds available stock.
    #[error("{0}")]
    InsufficientStock(String),

    #[error("Closure reason is required when birds remain in the batch.")]
    MissingClosureReason,

    #[error("No unit price supplied and the team has no priced live-bird product.")]
    MissingPricing,

    #[error("Daily logs can only be edited on the day they were recorded.")]
    EditWindowClosed,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Serialization error")]
    SerializationError(#[from] serde_json::Error),

    // Catch-all for unexpected errors; `anyhow` keeps the context chain.
    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Return every validation detail, field by field.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidTransition(msg)
            | AppError::MissingPrecondition(msg)
            | AppError::InsufficientStock(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),

            AppError::MissingClosureReason
            | AppError::MissingPricing
            | AppError::EditWindowClosed => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),

            // Everything else (DatabaseError, SerializationError,
            // InternalServerError) becomes a 500. `tracing` logs the detail;
            // the client gets a generic message.
            ref e => {
                tracing::error!("Internal server error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
