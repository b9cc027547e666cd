//! Custom error types for the store service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{catalog::CatalogError, credentials::CredentialError};

/// Custom error type for the store service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad request with a message safe to show to clients
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unknown email or wrong password
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// No `jwt-token` header on a verify request
    #[error("Token missing")]
    TokenMissing,

    /// Token failed signature or expiry checks
    #[error("Invalid token")]
    InvalidToken,

    /// Internal server error
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::DatabaseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "message": message })),
            ApiError::AuthenticationFailed => (StatusCode::UNAUTHORIZED, json!({ "message": "fail" })),
            ApiError::TokenMissing => {
                (StatusCode::BAD_REQUEST, json!({ "message": "Token missing" }))
            }
            ApiError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "status": "invalid auth", "message": "error" }),
            ),
            ApiError::InternalServerError(detail) => {
                error!("Internal server error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
            ApiError::Database(e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::PasswordMismatch
            | CredentialError::EmailAlreadyRegistered
            | CredentialError::Invalid(_) => ApiError::BadRequest(err.to_string()),
            CredentialError::InvalidCredentials => ApiError::AuthenticationFailed,
            CredentialError::InvalidToken => ApiError::InvalidToken,
            CredentialError::Database(e) => ApiError::Database(e),
            CredentialError::Internal(detail) => ApiError::InternalServerError(detail),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Invalid(message) => ApiError::BadRequest(message),
            CatalogError::Database(e) => ApiError::Database(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use common::DatabaseError;
    use http_body_util::BodyExt;

    async fn body_of(error: ApiError) -> serde_json::Value {
        let bytes = error.into_response().into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::AuthenticationFailed, StatusCode::UNAUTHORIZED),
            (ApiError::TokenMissing, StatusCode::BAD_REQUEST),
            (ApiError::InvalidToken, StatusCode::UNAUTHORIZED),
            (
                ApiError::InternalServerError("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Database(DatabaseError::Configuration("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_credential_errors_map_to_client_messages() {
        assert!(matches!(
            ApiError::from(CredentialError::PasswordMismatch),
            ApiError::BadRequest(message) if message == "Passwords do not match"
        ));
        assert!(matches!(
            ApiError::from(CredentialError::EmailAlreadyRegistered),
            ApiError::BadRequest(message) if message == "Email already registered"
        ));
        assert!(matches!(
            ApiError::from(CredentialError::InvalidCredentials),
            ApiError::AuthenticationFailed
        ));
    }

    #[tokio::test]
    async fn test_internal_errors_hide_their_detail() {
        let internal = body_of(ApiError::InternalServerError("pool exhausted".into())).await;
        let database = body_of(ApiError::Database(DatabaseError::Configuration(
            "relation documents does not exist".into(),
        )))
        .await;

        assert_eq!(internal, json!({"message": "Internal server error"}));
        assert_eq!(database, internal);
    }
}
