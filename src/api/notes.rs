// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Note API endpoints.
//!
//! Every handler takes [`Auth`] first, so unauthenticated requests are
//! rejected before the store is touched. Targeted operations go through
//! [`NoteScope`](crate::storage::NoteScope): a note owned by someone else is
//! indistinguishable from a missing one.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::Auth,
    error::{ApiError, ApiJson},
    models::{CreateNoteRequest, CreateNoteResponse, MessageResponse, Note, UpdateNoteRequest},
    state::AppState,
    storage::{NoteRepository, StoreError, StoredNote},
};

pub const NOTE_NOT_FOUND_MESSAGE: &str = "Note not found or unauthorized";

fn scoped_error(context: &str, err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound(_) => ApiError::not_found(NOTE_NOT_FOUND_MESSAGE),
        other => ApiError::internal(context, &other),
    }
}

/// List the caller's notes, newest first.
#[utoipa::path(
    get,
    path = "/notes",
    tag = "Notes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notes owned by the caller", body = [Note]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_notes(
    Auth(principal): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = NoteRepository::new(&state.store)
        .list_by_owner(&principal.user_id)
        .map_err(|e| ApiError::internal("list notes", &e))?;

    Ok(Json(notes))
}

/// Create a note owned by the caller.
#[utoipa::path(
    post,
    path = "/notes",
    tag = "Notes",
    security(("bearer_auth" = [])),
    request_body = CreateNoteRequest,
    responses(
        (status = 200, description = "Note created", body = CreateNoteResponse),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_note(
    Auth(principal): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateNoteRequest>,
) -> Result<Json<CreateNoteResponse>, ApiError> {
    let note = StoredNote::new(principal.user_id, request.content, request.is_audio);

    NoteRepository::new(&state.store)
        .create(&note)
        .map_err(|e| ApiError::internal("create note", &e))?;

    tracing::debug!(note_id = %note.id, owner = %note.user_id, "note created");
    Ok(Json(CreateNoteResponse { id: note.id }))
}

/// Replace the content of one of the caller's notes.
#[utoipa::path(
    put,
    path = "/notes/{id}",
    tag = "Notes",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Note identifier")),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated", body = MessageResponse),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Note not found or unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_note(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(note_id): Path<String>,
    ApiJson(request): ApiJson<UpdateNoteRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let scope = state.guard.authorize_and_scope(&principal, note_id);

    NoteRepository::new(&state.store)
        .update_content(&scope, &request.content)
        .map_err(|e| scoped_error("update note", e))?;

    Ok(Json(MessageResponse::new("Note updated successfully")))
}

/// Delete one of the caller's notes.
#[utoipa::path(
    delete,
    path = "/notes/{id}",
    tag = "Notes",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Note identifier")),
    responses(
        (status = 200, description = "Note deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Note not found or unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_note(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let scope = state.guard.authorize_and_scope(&principal, note_id);

    NoteRepository::new(&state.store)
        .delete(&scope)
        .map_err(|e| scoped_error("delete note", e))?;

    Ok(Json(MessageResponse::new("Note deleted successfully")))
}
