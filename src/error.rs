//! Error types with HTTP status code mapping.
//!
//! [`DbError`] covers the persistence layer; [`ApiError`] is the central
//! error type for handlers. Database detail is logged server-side and
//! never leaks into a client response — every [`ApiError`] variant maps
//! to a fixed status code and fixed JSON message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Fixed JSON response body used for both success and error responses.
///
/// All responses from the registration API follow this shape:
/// ```json
/// { "message": "Campos incompletos" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome message.
    pub message: String,
}

impl MessageResponse {
    /// Builds a response body from a static message.
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Persistence layer error taxonomy.
///
/// Failures propagate upward with full driver detail attached; the
/// handler layer is the single point that translates them into a
/// client-safe response.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A single statement failed: connectivity, constraint violation,
    /// or SQL syntax. Carries the underlying driver error.
    #[error("query error: {0}")]
    Query(#[from] sqlx::Error),

    /// A transactional unit of work failed and was rolled back. Carries
    /// the failure that triggered the rollback.
    #[error("transaction error: {0}")]
    Transaction(#[source] Box<DbError>),
}

/// Handler-level error enum with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// One or more required request fields are missing or empty.
    #[error("incomplete fields in request body")]
    MissingFields,

    /// The request body could not be parsed into the expected structure.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// Database failure while serving the request.
    #[error("database error: {0}")]
    Database(#[from] DbError),
}

impl ApiError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the fixed client-facing message for this variant.
    ///
    /// Messages are deliberately generic: database detail stays in the
    /// server logs.
    #[must_use]
    pub const fn client_message(&self) -> &'static str {
        match self {
            Self::MissingFields | Self::MalformedBody(_) => "Campos incompletos",
            Self::Database(_) => "Error en el servidor al registrar usuario",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Database(ref err) = self {
            tracing::error!(error = %err, "database failure while handling request");
        }

        let status = self.status_code();
        let body = MessageResponse::new(self.client_message());
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
