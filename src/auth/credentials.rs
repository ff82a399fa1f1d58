// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential service: signup, login and token issuance.

use std::sync::Arc;

use chrono::Utc;

use super::{password::PasswordHasher, CredentialError, TokenKeys};
use crate::storage::{AccountRepository, DocumentStore, StoreError, StoredAccount};

/// Validates credentials against stored accounts and issues session tokens.
pub struct CredentialService {
    store: Arc<DocumentStore>,
    hasher: PasswordHasher,
    keys: Arc<TokenKeys>,
}

impl CredentialService {
    pub fn new(store: Arc<DocumentStore>, hasher: PasswordHasher, keys: Arc<TokenKeys>) -> Self {
        Self {
            store,
            hasher,
            keys,
        }
    }

    /// Create an account and return a token bound to it.
    pub async fn register(&self, email: &str, password: &str) -> Result<String, CredentialError> {
        validate(email, password)?;

        let accounts = AccountRepository::new(&self.store);
        if accounts.find_by_email(email).map_err(store_error)?.is_some() {
            return Err(CredentialError::DuplicateAccount);
        }

        let password_hash = self.hash_password(password).await?;
        let account = StoredAccount::new(email, password_hash);

        // The lookup above is only a fast path; the insert enforces uniqueness.
        AccountRepository::new(&self.store)
            .create(&account)
            .map_err(|e| match e {
                StoreError::AlreadyExists(_) => CredentialError::DuplicateAccount,
                other => store_error(other),
            })?;

        tracing::info!(account_id = %account.id, "account registered");
        self.issue(&account.id)
    }

    /// Check credentials and return a token for the matching account.
    ///
    /// Unknown email and wrong password both yield
    /// [`CredentialError::InvalidCredentials`].
    pub async fn login(&self, email: &str, password: &str) -> Result<String, CredentialError> {
        validate(email, password)?;

        let account = AccountRepository::new(&self.store)
            .find_by_email(email)
            .map_err(store_error)?;

        let Some(account) = account else {
            // Spend a hash so unknown emails cost the same as wrong passwords.
            if let Err(e) = self.hash_password(password).await {
                tracing::debug!(error = %e, "dummy hash for unknown email failed");
            }
            tracing::debug!("login rejected");
            return Err(CredentialError::InvalidCredentials);
        };

        if !self
            .verify_password(password, &account.password_hash)
            .await?
        {
            tracing::debug!(account_id = %account.id, "login rejected");
            return Err(CredentialError::InvalidCredentials);
        }

        tracing::info!(account_id = %account.id, "account logged in");
        self.issue(&account.id)
    }

    fn issue(&self, account_id: &str) -> Result<String, CredentialError> {
        Ok(self.keys.issue(account_id, Utc::now().timestamp())?)
    }

    async fn hash_password(&self, password: &str) -> Result<String, CredentialError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| CredentialError::Internal(format!("hashing task failed: {e}")))?
            .map_err(|e| CredentialError::Internal(e.to_string()))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| CredentialError::Internal(format!("verification task failed: {e}")))
    }
}

fn validate(email: &str, password: &str) -> Result<(), CredentialError> {
    if email.trim().is_empty() {
        return Err(CredentialError::Validation("Email is required".to_string()));
    }
    if password.is_empty() {
        return Err(CredentialError::Validation("Password is required".to_string()));
    }
    Ok(())
}

fn store_error(err: StoreError) -> CredentialError {
    CredentialError::Internal(err.to_string())
}
