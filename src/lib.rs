// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational Notes - Per-user note-taking service
//!
//! Accounts sign up and log in with an email and password, receive a
//! short-lived signed session token, and manage notes that only they can
//! read, edit or delete.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Credential service, session tokens and the access guard
//! - `config` - Environment-driven startup configuration
//! - `storage` - Embedded document store (redb)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
