// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership scoping for note storage operations.
//!
//! Owner checks are never applied after a record has been loaded. Instead
//! every targeted note operation takes a [`NoteScope`], which can only be
//! built from an authenticated [`Principal`], and whose store key embeds the
//! owner. A record owned by someone else is simply not addressable.

use crate::auth::Principal;

/// The (owner, note) pair a targeted note operation is restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteScope {
    owner_user_id: String,
    note_id: String,
}

impl NoteScope {
    /// Restrict an operation on `note_id` to notes owned by `principal`.
    pub fn for_principal(principal: &Principal, note_id: impl Into<String>) -> Self {
        Self {
            owner_user_id: principal.user_id.clone(),
            note_id: note_id.into(),
        }
    }

    pub fn owner_user_id(&self) -> &str {
        &self.owner_user_id
    }

    pub fn note_id(&self) -> &str {
        &self.note_id
    }
}
