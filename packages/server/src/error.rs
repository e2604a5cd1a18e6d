//! Mapping from operation errors to HTTP responses.
//!
//! This is the only place error kinds become status codes. Internal failures are
//! logged here with full detail; clients only ever see a generic message.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chatstream_api::error::{CredentialError, IdentityError, RegistrationError, StoreError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection);
        ApiError::InvalidRequest("Invalid request body".to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path: {}", rejection);
        ApiError::InvalidRequest("Invalid path parameter".to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection);
        ApiError::InvalidRequest("Invalid query string".to_string())
    }
}

impl ApiError {
    fn internal(err: &dyn std::fmt::Display) -> (StatusCode, String) {
        tracing::error!("Internal error: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error".to_string(),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Registration(RegistrationError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, msg.to_string())
            }
            ApiError::Registration(e @ RegistrationError::DuplicateEmail)
            | ApiError::Registration(e @ RegistrationError::DuplicateUsername) => {
                (StatusCode::CONFLICT, e.to_string())
            }
            ApiError::Registration(e) => Self::internal(e),
            ApiError::Credential(CredentialError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            ApiError::Credential(e) => Self::internal(e),
            ApiError::Identity(IdentityError::NotAuthenticated) => {
                (StatusCode::UNAUTHORIZED, "Not authenticated".to_string())
            }
            ApiError::Identity(e) => Self::internal(e),
            ApiError::Store(e) => Self::internal(e),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
