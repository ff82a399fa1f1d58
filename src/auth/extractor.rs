// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated principals.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(principal): Auth) -> impl IntoResponse {
//!     // principal.user_id scopes every store access
//! }
//! ```
//!
//! Put `Auth` before any body extractor: axum runs parts extractors first,
//! so an unauthenticated request is rejected before its body is read and
//! before any handler code touches the store.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, Principal};
use crate::state::AppState;

/// Extractor for authenticated principals.
pub struct Auth(pub Principal);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let principal = state.guard.authenticate(&parts.headers)?;
        Ok(Auth(principal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;
    use axum::http::Request;
    use chrono::Utc;

    #[tokio::test]
    async fn auth_extractor_requires_auth_header() {
        let (state, _dir) = test_state();
        let mut parts = Request::builder()
            .uri("/notes")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_succeeds_with_issued_token() {
        let (state, _dir) = test_state();
        let token = state.keys.issue("acct_123", Utc::now().timestamp()).unwrap();
        let mut parts = Request::builder()
            .uri("/notes")
            .header("Authorization", format!("Bearer {token}"))
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let Auth(principal) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(principal.user_id, "acct_123");
    }

    #[tokio::test]
    async fn auth_extractor_rejects_forged_token() {
        let (state, _dir) = test_state();
        let forged = crate::auth::TokenKeys::from_secret(b"attacker")
            .issue("acct_123", Utc::now().timestamp())
            .unwrap();
        let mut parts = Request::builder()
            .uri("/notes")
            .header("Authorization", format!("Bearer {forged}"))
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }
}
