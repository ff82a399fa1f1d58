// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistent storage for accounts and notes in an embedded redb file under
//! `DATA_DIR`.
//!
//! ## Guarantees
//!
//! - Account emails are unique. The constraint is checked inside the insert
//!   transaction, so racing signups cannot both succeed.
//! - Note keys embed the owner id. Reads, updates and deletes of a note are
//!   only expressible through a [`NoteScope`] built from the requesting
//!   principal.
//! - Listing a principal's notes is a single prefix range scan, newest first.

pub mod database;
pub mod ownership;
pub mod repository;

pub use database::{DocumentStore, StoreError, StoreResult};
pub use ownership::NoteScope;
pub use repository::{AccountRepository, NoteRepository, StoredAccount, StoredNote};
