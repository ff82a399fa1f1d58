// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded document store backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `accounts`: account_id → serialized StoredAccount
//! - `account_emails`: email → account_id (uniqueness constraint)
//! - `notes`: composite key (owner_id|note_id) → serialized StoredNote
//! - `owner_notes`: composite key (owner_id|!created_at|note_id) → note_id
//!   for newest-first listing
//!
//! redb serializes write transactions, so every check-and-write done inside
//! a single write transaction is atomic with respect to other requests.

use std::path::Path;

use redb::{Database, ReadableDatabase};

use super::repository::{accounts, notes};

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// DocumentStore
// =============================================================================

/// Embedded ACID document store holding accounts and notes.
pub struct DocumentStore {
    db: Database,
}

impl DocumentStore {
    /// Open (or create) the store at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(accounts::ACCOUNTS)?;
            let _ = write_txn.open_table(accounts::ACCOUNT_EMAILS)?;
            let _ = write_txn.open_table(notes::NOTES)?;
            let _ = write_txn.open_table(notes::OWNER_NOTES)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    pub(crate) fn db(&self) -> &Database {
        &self.db
    }

    /// Verify the store can serve a read transaction.
    pub fn health_check(&self) -> StoreResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(accounts::ACCOUNTS)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn temp_store() -> (DocumentStore, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::open(&dir.path().join("test.redb")).unwrap();
    (store, dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_file_and_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("notes.redb");

        let store = DocumentStore::open(&path).unwrap();
        assert!(path.exists());
        store.health_check().unwrap();
    }

    #[test]
    fn reopen_preserves_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.redb");

        drop(DocumentStore::open(&path).unwrap());
        let store = DocumentStore::open(&path).unwrap();
        store.health_check().unwrap();
    }

    #[test]
    fn temp_store_is_healthy() {
        let (store, _dir) = temp_store();
        assert!(store.health_check().is_ok());
    }
}
