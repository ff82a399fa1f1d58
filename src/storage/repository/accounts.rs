// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account repository.
//!
//! Accounts are keyed by their store-assigned id. A second table maps each
//! email to its account id and acts as the uniqueness constraint: the email
//! check and both inserts happen inside one write transaction.

use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};

use super::super::{DocumentStore, StoreError, StoreResult};

/// Primary table: account_id → serialized StoredAccount (JSON bytes).
pub(crate) const ACCOUNTS: TableDefinition<&str, &[u8]> = TableDefinition::new("accounts");

/// Unique index: email (exact, case-sensitive) → account_id.
pub(crate) const ACCOUNT_EMAILS: TableDefinition<&str, &str> =
    TableDefinition::new("account_emails");

/// Account record. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredAccount {
    /// Unique account identifier (UUID)
    pub id: String,
    /// Login email, unique as stored
    pub email: String,
    /// Argon2id PHC string
    pub password_hash: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl StoredAccount {
    /// Build a new account with a fresh id.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}

/// Repository for account operations.
pub struct AccountRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> AccountRepository<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, account_id: &str) -> StoreResult<Option<StoredAccount>> {
        let read_txn = self.store.db().begin_read()?;
        let table = read_txn.open_table(ACCOUNTS)?;
        match table.get(account_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Look up an account by exact email.
    pub fn find_by_email(&self, email: &str) -> StoreResult<Option<StoredAccount>> {
        let read_txn = self.store.db().begin_read()?;
        let emails = read_txn.open_table(ACCOUNT_EMAILS)?;
        let account_id = match emails.get(email)? {
            Some(id) => id.value().to_string(),
            None => return Ok(None),
        };

        let accounts = read_txn.open_table(ACCOUNTS)?;
        match accounts.get(account_id.as_str())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Err(StoreError::NotFound(format!(
                "Account {account_id} referenced by email index"
            ))),
        }
    }

    /// Insert a new account.
    ///
    /// Fails with [`StoreError::AlreadyExists`] if the email is taken, even
    /// when another request inserted it after the caller's own lookup.
    pub fn create(&self, account: &StoredAccount) -> StoreResult<()> {
        let json = serde_json::to_vec(account)?;

        let write_txn = self.store.db().begin_write()?;
        let inserted = {
            let mut emails = write_txn.open_table(ACCOUNT_EMAILS)?;
            if emails.get(account.email.as_str())?.is_some() {
                false
            } else {
                emails.insert(account.email.as_str(), account.id.as_str())?;
                let mut accounts = write_txn.open_table(ACCOUNTS)?;
                accounts.insert(account.id.as_str(), json.as_slice())?;
                true
            }
        };

        if !inserted {
            write_txn.abort()?;
            return Err(StoreError::AlreadyExists("Account email".to_string()));
        }

        write_txn.commit()?;
        Ok(())
    }
}
