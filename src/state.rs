// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{
    password::{PasswordError, PasswordHasher},
    AccessGuard, CredentialService, TokenKeys,
};
use crate::config::AppConfig;
use crate::storage::DocumentStore;

/// Shared, immutable application state. Cloning only bumps `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub keys: Arc<TokenKeys>,
    pub credentials: Arc<CredentialService>,
    pub guard: AccessGuard,
}

impl AppState {
    pub fn new(config: &AppConfig, store: DocumentStore) -> Result<Self, PasswordError> {
        let store = Arc::new(store);
        let keys = Arc::new(TokenKeys::from_secret(config.jwt_secret.as_bytes()));
        let hasher = PasswordHasher::new(config.hash_cost)?;

        Ok(Self {
            credentials: Arc::new(CredentialService::new(store.clone(), hasher, keys.clone())),
            guard: AccessGuard::new(keys.clone()),
            keys,
            store,
        })
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> (AppState, tempfile::TempDir) {
    let (store, dir) = crate::storage::database::temp_store();
    let config = AppConfig::from_lookup(|name| match name {
        crate::config::JWT_SECRET_ENV => Some("test-secret".to_string()),
        _ => None,
    })
    .unwrap();
    let config = AppConfig {
        hash_cost: crate::auth::password::test_cost(),
        ..config
    };
    (AppState::new(&config, store).unwrap(), dir)
}
