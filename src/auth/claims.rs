// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token claims and the authenticated principal.

use serde::{Deserialize, Serialize};

/// Claims carried by a session token.
///
/// The payload is deliberately small: the account id plus the standard
/// issued-at and expiry timestamps (Unix seconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account identifier the token is bound to.
    #[serde(rename = "userId")]
    pub user_id: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

/// Authenticated account derived from a verified session token.
///
/// This is the primary type used throughout the application to represent
/// who is making a request. Every note query is scoped by `user_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Canonical account ID
    pub user_id: String,
}

impl Principal {
    pub fn from_claims(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_use_camel_case_user_id() {
        let claims = SessionClaims {
            user_id: "acct_1".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], "acct_1");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn principal_from_claims() {
        let principal = Principal::from_claims(SessionClaims {
            user_id: "acct_1".to_string(),
            iat: 10,
            exp: 3610,
        });
        assert_eq!(principal.user_id, "acct_1");
    }
}
