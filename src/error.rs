//! Ledger error types with HTTP status code mapping.
//!
//! [`LedgerError`] is the central error type of the crate. Validation and
//! booking failures are recoverable and never leave partial state behind;
//! storage failures surface as server errors.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::RecordId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4001,
///     "message": "no seats left on route 1700000000000"
///   }
/// }
/// ```
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error enum shared by the store access layer and the booking engine.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request              |
/// | 2000–2999 | Not Found       | 404 Not Found                |
/// | 3000–3999 | Storage/Server  | 500 Internal Server Error    |
/// | 4000–4999 | Capacity        | 409 Conflict                 |
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Route creation input was rejected (title, times or seat count).
    #[error("invalid route: {0}")]
    Validation(String),

    /// A required booking or feedback field was empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// No route with the given id exists in the current snapshot.
    #[error("route not found: {0}")]
    RouteNotFound(RecordId),

    /// The route has no seats left.
    #[error("no seats left on route {route_id} ({seats} seats)")]
    SoldOut {
        /// Route that is full.
        route_id: RecordId,
        /// Total capacity of the route.
        seats: u32,
    },

    /// A stored collection could not be decoded (strict decoding only).
    #[error("cannot decode collection `{collection}`: {message}")]
    Decode {
        /// Name of the collection blob.
        collection: &'static str,
        /// Decoder message.
        message: String,
    },

    /// Backing store read or write failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::MissingField(_) => 1002,
            Self::RouteNotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::Storage(_) => 3001,
            Self::Decode { .. } => 3002,
            Self::SoldOut { .. } => 4001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Self::SoldOut { .. } => StatusCode::CONFLICT,
            Self::Decode { .. } | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns `true` for failures caused by caller input rather than the
    /// backing store.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::MissingField(_)
                | Self::RouteNotFound(_)
                | Self::SoldOut { .. }
        )
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<JsonRejection> for LedgerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if !self.is_recoverable() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
