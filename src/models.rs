// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies used by the REST API. Field names are
//! camelCase on the wire. All types derive `ToSchema` for the OpenAPI
//! document.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A note as returned by `GET /notes`.
pub use crate::storage::StoredNote as Note;

// =============================================================================
// Auth Models
// =============================================================================

/// Signup or login request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
    /// `true` to log in to an existing account, `false` to sign up.
    #[serde(default)]
    pub is_login: bool,
}

/// Session token issued on successful signup or login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// HS256 JWT, valid for one hour.
    pub token: String,
}

// =============================================================================
// Note Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub content: String,
    /// Whether `content` is a voice transcription.
    #[serde(default)]
    pub is_audio: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteResponse {
    /// Identifier of the created note.
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    pub content: String,
}

/// Confirmation message for update and delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
