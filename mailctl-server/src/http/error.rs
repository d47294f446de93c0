//! API error type with IntoResponse
//!
//! Every failure is rendered into the same envelope:
//! `{"status": "error", "reason": <string | list of field errors>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::db::StoreError;
use crate::models::ValidationError;

/// Reason reported when a mail id does not resolve to a record.
pub const MAIL_NOT_FOUND: &str = "mail not found";

/// Reason reported for requests that match no route.
pub const ROUTE_NOT_FOUND: &str = "not found";

/// Reason reported when a route exists but not for the request method.
pub const METHOD_NOT_ALLOWED: &str = "method not allowed";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Lookup by id found nothing (404)
    NotFound { reason: &'static str },

    /// Route exists, method does not (405)
    MethodNotAllowed,

    /// Request ran past the configured timeout (408)
    Timeout { seconds: u64 },

    /// Storage is not reachable (503, logged)
    Unavailable(StoreError),

    /// Storage failure (500, logged)
    Database(StoreError),
}

impl ApiError {
    pub fn mail_not_found() -> Self {
        Self::NotFound {
            reason: MAIL_NOT_FOUND,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON payload for the `reason` key of the envelope.
    pub fn reason(&self) -> Value {
        match self {
            Self::Validation(e) => json!(e.errors()),
            Self::NotFound { reason } => json!(reason),
            Self::MethodNotAllowed => json!(METHOD_NOT_ALLOWED),
            Self::Timeout { seconds } => {
                json!(format!("request timed out after {seconds} seconds"))
            }
            Self::Unavailable(_) => json!("storage unavailable"),
            Self::Database(_) => json!("internal server error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Validation(e) => tracing::debug!("Rejected request: {}", e),
            // Log the actual error, return generic message
            Self::Database(e) => tracing::error!("Database error: {}", e),
            Self::Unavailable(e) => tracing::warn!("Storage unreachable: {}", e),
            Self::Timeout { seconds } => tracing::warn!("Request timed out after {}s", seconds),
            Self::NotFound { .. } | Self::MethodNotAllowed => {}
        }

        let body = json!({
            "status": "error",
            "reason": self.reason(),
        });

        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => Self::mail_not_found(),
            StoreError::Sqlx(_) => Self::Database(e),
        }
    }
}
