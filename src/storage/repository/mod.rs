// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the document store.
//!
//! Each repository provides the operations for a specific entity type,
//! borrowing the [`DocumentStore`](super::DocumentStore) for its transactions.

pub mod accounts;
pub mod notes;

pub use accounts::{AccountRepository, StoredAccount};
pub use notes::{NoteRepository, StoredNote};
