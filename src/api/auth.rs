// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signup and login endpoint.

use axum::{extract::State, Json};

use crate::{
    error::{ApiError, ApiJson},
    models::{AuthRequest, TokenResponse},
    state::AppState,
};

/// Sign up (`isLogin: false`) or log in (`isLogin: true`).
///
/// Both paths return a session token valid for one hour.
#[utoipa::path(
    post,
    path = "/auth",
    tag = "Auth",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Missing fields or account already exists"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn authenticate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AuthRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = if request.is_login {
        state
            .credentials
            .login(&request.email, &request.password)
            .await?
    } else {
        state
            .credentials
            .register(&request.email, &request.password)
            .await?
    };

    Ok(Json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;
    use axum::http::StatusCode;

    fn request(email: &str, password: &str, is_login: bool) -> ApiJson<AuthRequest> {
        ApiJson(AuthRequest {
            email: email.to_string(),
            password: password.to_string(),
            is_login,
        })
    }

    #[tokio::test]
    async fn signup_then_login_issue_tokens_for_same_account() {
        let (state, _dir) = test_state();

        let Json(signup) = authenticate(State(state.clone()), request("a@x.com", "pw1", false))
            .await
            .expect("signup succeeds");
        let Json(login) = authenticate(State(state.clone()), request("a@x.com", "pw1", true))
            .await
            .expect("login succeeds");

        let now = chrono::Utc::now().timestamp();
        let first = state.keys.verify(&signup.token, now).unwrap();
        let second = state.keys.verify(&login.token, now).unwrap();
        assert_eq!(first.user_id, second.user_id);
    }

    #[tokio::test]
    async fn duplicate_signup_is_bad_request() {
        let (state, _dir) = test_state();
        let Json(signup) = authenticate(State(state.clone()), request("a@x.com", "pw1", false))
            .await
            .unwrap();
        assert!(!signup.token.is_empty());

        let err = authenticate(State(state), request("a@x.com", "other", false))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "User already exists");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let (state, _dir) = test_state();
        let Json(signup) = authenticate(State(state.clone()), request("a@x.com", "pw1", false))
            .await
            .unwrap();
        assert!(!signup.token.is_empty());

        let wrong = authenticate(State(state.clone()), request("a@x.com", "nope", true))
            .await
            .unwrap_err();
        let unknown = authenticate(State(state), request("b@x.com", "pw1", true))
            .await
            .unwrap_err();

        assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong.status, unknown.status);
        assert_eq!(wrong.message, unknown.message);
    }
}
