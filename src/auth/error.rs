// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and credential errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Response message for every token rejection.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
/// Response message for a failed login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
/// Response message for a signup with a taken email.
pub const DUPLICATE_ACCOUNT_MESSAGE: &str = "User already exists";

/// Access-guard error type.
///
/// The variants exist for server-side logging. Every rejection variant is
/// rendered to the caller as the same `401 {"error":"Unauthorized"}`.
#[derive(Debug)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Invalid authorization header format
    InvalidAuthHeader,
    /// Token is malformed
    MalformedToken,
    /// Token signature is invalid
    InvalidSignature,
    /// Token has expired
    TokenExpired,
    /// Internal error
    InternalError(String),
}

impl AuthError {
    /// Get the error code for this error (logged, never returned).
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::InternalError(_) => "internal_error",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header is required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::MalformedToken => write!(f, "Token is malformed"),
            AuthError::InvalidSignature => write!(f, "Token signature is invalid"),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::InternalError(msg) => write!(f, "Internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InternalError(_) => ApiError::internal("authentication", &err),
            _ => {
                tracing::debug!(reason = err.error_code(), "request rejected by access guard");
                ApiError::new(StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE)
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Credential service error type.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("{0}")]
    Validation(String),

    #[error("account already exists")]
    DuplicateAccount,

    /// Unknown email or wrong password; the two are not distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("internal credential error: {0}")]
    Internal(String),
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Validation(reason) => ApiError::bad_request(reason),
            CredentialError::DuplicateAccount => ApiError::bad_request(DUPLICATE_ACCOUNT_MESSAGE),
            CredentialError::InvalidCredentials => {
                ApiError::new(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS_MESSAGE)
            }
            CredentialError::Internal(_) => ApiError::internal("credentials", &err),
        }
    }
}

impl From<AuthError> for CredentialError {
    fn from(err: AuthError) -> Self {
        CredentialError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn every_rejection_has_identical_response() {
        let rejections = [
            AuthError::MissingAuthHeader,
            AuthError::InvalidAuthHeader,
            AuthError::MalformedToken,
            AuthError::InvalidSignature,
            AuthError::TokenExpired,
        ];

        for rejection in rejections {
            let response = rejection.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(body_of(response).await, r#"{"error":"Unauthorized"}"#);
        }
    }

    #[tokio::test]
    async fn internal_auth_error_is_opaque_500() {
        let response = AuthError::InternalError("signing key exploded".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await, r#"{"error":"Internal server error"}"#);
    }

    #[test]
    fn credential_errors_map_to_api_errors() {
        let dup = ApiError::from(CredentialError::DuplicateAccount);
        assert_eq!(dup.status, StatusCode::BAD_REQUEST);
        assert_eq!(dup.message, "User already exists");

        let invalid = ApiError::from(CredentialError::InvalidCredentials);
        assert_eq!(invalid.status, StatusCode::UNAUTHORIZED);
        assert_eq!(invalid.message, "Invalid credentials");

        let validation = ApiError::from(CredentialError::Validation("Email is required".into()));
        assert_eq!(validation.status, StatusCode::BAD_REQUEST);
        assert_eq!(validation.message, "Email is required");

        let internal = ApiError::from(CredentialError::Internal("disk full".into()));
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.message, "Internal server error");
    }
}
