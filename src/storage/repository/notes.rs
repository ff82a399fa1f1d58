// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Note repository.
//!
//! Notes are keyed by `owner_id|note_id`, so a lookup without the owner is
//! impossible. A second table keyed by `owner_id|!created_at|note_id` gives
//! newest-first listing with a single prefix range scan.

use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStore, NoteScope, StoreError, StoreResult};

/// Primary table: composite key (owner_id|note_id) → serialized StoredNote.
pub(crate) const NOTES: TableDefinition<&[u8], &[u8]> = TableDefinition::new("notes");

/// Index: composite key (owner_id|!created_at_micros|note_id) → note_id.
pub(crate) const OWNER_NOTES: TableDefinition<&[u8], &str> = TableDefinition::new("owner_notes");

const KEY_SEPARATOR: u8 = b'|';

/// A note as stored and as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredNote {
    /// Unique note identifier (UUID)
    pub id: String,
    /// Owning account id
    pub user_id: String,
    /// Note text (typed, or transcribed from audio by the client)
    pub content: String,
    /// Whether the content came from a voice recording
    pub is_audio: bool,
    /// When the note was created
    pub created_at: DateTime<Utc>,
}

impl StoredNote {
    /// Build a new note for `owner_user_id` with a fresh id.
    pub fn new(owner_user_id: impl Into<String>, content: impl Into<String>, is_audio: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: owner_user_id.into(),
            content: content.into(),
            is_audio,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Key Helpers
// =============================================================================

fn make_note_key(owner_user_id: &str, note_id: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(owner_user_id.len() + 1 + note_id.len());
    key.extend_from_slice(owner_user_id.as_bytes());
    key.push(KEY_SEPARATOR);
    key.extend_from_slice(note_id.as_bytes());
    key
}

/// Index key; the inverted timestamp makes a forward scan newest-first.
fn make_index_key(owner_user_id: &str, created_at: &DateTime<Utc>, note_id: &str) -> Vec<u8> {
    let micros = created_at.timestamp_micros();
    let mut key = Vec::with_capacity(owner_user_id.len() + 1 + 8 + 1 + note_id.len());
    key.extend_from_slice(owner_user_id.as_bytes());
    key.push(KEY_SEPARATOR);
    key.extend_from_slice(&(!micros as u64).to_be_bytes());
    key.push(KEY_SEPARATOR);
    key.extend_from_slice(note_id.as_bytes());
    key
}

/// Half-open `[start, end)` range covering every index key of one owner.
fn owner_range(owner_user_id: &str) -> (Vec<u8>, Vec<u8>) {
    let mut start = owner_user_id.as_bytes().to_vec();
    let mut end = start.clone();
    start.push(KEY_SEPARATOR);
    end.push(KEY_SEPARATOR + 1);
    (start, end)
}

// =============================================================================
// NoteRepository
// =============================================================================

/// Repository for note operations. Every method is owner-scoped.
pub struct NoteRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> NoteRepository<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// Insert a note and its listing index entry.
    pub fn create(&self, note: &StoredNote) -> StoreResult<()> {
        let key = make_note_key(&note.user_id, &note.id);
        let index_key = make_index_key(&note.user_id, &note.created_at, &note.id);
        let json = serde_json::to_vec(note)?;

        let write_txn = self.store.db().begin_write()?;
        let inserted = {
            let mut notes = write_txn.open_table(NOTES)?;
            if notes.get(key.as_slice())?.is_some() {
                false
            } else {
                notes.insert(key.as_slice(), json.as_slice())?;
                let mut index = write_txn.open_table(OWNER_NOTES)?;
                index.insert(index_key.as_slice(), note.id.as_str())?;
                true
            }
        };

        if !inserted {
            write_txn.abort()?;
            return Err(StoreError::AlreadyExists(format!("Note {}", note.id)));
        }

        write_txn.commit()?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn get(&self, scope: &NoteScope) -> StoreResult<Option<StoredNote>> {
        let key = make_note_key(scope.owner_user_id(), scope.note_id());
        let read_txn = self.store.db().begin_read()?;
        let table = read_txn.open_table(NOTES)?;
        match table.get(key.as_slice())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// List every note owned by `owner_user_id`, newest first.
    pub fn list_by_owner(&self, owner_user_id: &str) -> StoreResult<Vec<StoredNote>> {
        let read_txn = self.store.db().begin_read()?;
        let index = read_txn.open_table(OWNER_NOTES)?;
        let notes = read_txn.open_table(NOTES)?;

        let (start, end) = owner_range(owner_user_id);
        let mut results = Vec::new();
        for entry in index.range(start.as_slice()..end.as_slice())? {
            let (_, note_id) = entry?;
            let key = make_note_key(owner_user_id, note_id.value());
            match notes.get(key.as_slice())? {
                Some(value) => results.push(serde_json::from_slice(value.value())?),
                None => tracing::warn!(
                    note_id = %note_id.value(),
                    "Listing index references a missing note, skipping"
                ),
            }
        }

        Ok(results)
    }

    /// Replace the content of the note in `scope`.
    ///
    /// Returns [`StoreError::NotFound`] when no note matches both the id and
    /// the owner.
    pub fn update_content(&self, scope: &NoteScope, content: &str) -> StoreResult<StoredNote> {
        let key = make_note_key(scope.owner_user_id(), scope.note_id());

        let write_txn = self.store.db().begin_write()?;
        let updated = {
            let mut table = write_txn.open_table(NOTES)?;
            let existing = table.get(key.as_slice())?.map(|v| v.value().to_vec());
            match existing {
                Some(bytes) => {
                    let mut note: StoredNote = serde_json::from_slice(&bytes)?;
                    note.content = content.to_string();
                    let json = serde_json::to_vec(&note)?;
                    table.insert(key.as_slice(), json.as_slice())?;
                    Some(note)
                }
                None => None,
            }
        };

        match updated {
            Some(note) => {
                write_txn.commit()?;
                Ok(note)
            }
            None => {
                write_txn.abort()?;
                Err(StoreError::NotFound(format!("Note {}", scope.note_id())))
            }
        }
    }

    /// Delete the note in `scope` together with its index entry.
    ///
    /// Returns [`StoreError::NotFound`] when no note matches both the id and
    /// the owner.
    pub fn delete(&self, scope: &NoteScope) -> StoreResult<()> {
        let key = make_note_key(scope.owner_user_id(), scope.note_id());

        let write_txn = self.store.db().begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(NOTES)?;
            let removed = table.remove(key.as_slice())?.map(|v| v.value().to_vec());
            match removed {
                Some(bytes) => {
                    let note: StoredNote = serde_json::from_slice(&bytes)?;
                    let index_key = make_index_key(&note.user_id, &note.created_at, &note.id);
                    let mut index = write_txn.open_table(OWNER_NOTES)?;
                    index.remove(index_key.as_slice())?;
                    true
                }
                None => false,
            }
        };

        if !removed {
            write_txn.abort()?;
            return Err(StoreError::NotFound(format!("Note {}", scope.note_id())));
        }

        write_txn.commit()?;
        Ok(())
    }
}
