// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access guard: bearer token verification and per-principal scoping.

use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::Utc;

use super::{AuthError, Principal, TokenKeys};
use crate::storage::NoteScope;

/// Verifies session tokens and scopes note operations to their principal.
#[derive(Clone)]
pub struct AccessGuard {
    keys: Arc<TokenKeys>,
}

impl AccessGuard {
    pub fn new(keys: Arc<TokenKeys>) -> Self {
        Self { keys }
    }

    /// Authenticate a request from its headers at the current time.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AuthError> {
        self.authenticate_at(headers, Utc::now().timestamp())
    }

    /// Authenticate a request from its headers at `now` (Unix seconds).
    pub fn authenticate_at(&self, headers: &HeaderMap, now: i64) -> Result<Principal, AuthError> {
        let token = bearer_token(headers)?;
        self.keys.verify(token, now)
    }

    /// Restrict an operation on `note_id` to notes owned by `principal`.
    pub fn authorize_and_scope(&self, principal: &Principal, note_id: impl Into<String>) -> NoteScope {
        NoteScope::for_principal(principal, note_id)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    // Auth scheme names are case-insensitive (RFC 7235).
    let (scheme, token) = auth_header
        .split_once(' ')
        .ok_or(AuthError::InvalidAuthHeader)?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::InvalidAuthHeader);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }
    Ok(token)
}
