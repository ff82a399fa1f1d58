// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Password credentials, signed session tokens and the access guard that
//! scopes every note operation to its caller.
//!
//! ## Auth Flow
//!
//! 1. Client posts `{email, password, isLogin}` to `/auth`
//! 2. [`CredentialService`] checks the Argon2id hash (or creates the account)
//!    and issues an HS256 token `{userId, iat, exp}` valid for one hour
//! 3. Client sends `Authorization: Bearer <token>` on every note request
//! 4. [`AccessGuard`] verifies signature and expiry and yields the
//!    [`Principal`]; note storage is addressed through that principal only
//!
//! ## Security
//!
//! - Unknown email and wrong password produce the same 401
//! - Missing, malformed, forged and expired tokens produce the same 401
//! - Tokens are stateless; there is no session table and no revocation
//! - No clock-skew leeway is applied to expiry

pub mod claims;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod guard;
pub mod password;
pub mod token;

pub use claims::{Principal, SessionClaims};
pub use credentials::CredentialService;
pub use error::{AuthError, CredentialError};
pub use extractor::Auth;
pub use guard::AccessGuard;
pub use token::TokenKeys;
