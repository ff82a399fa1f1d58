// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the server secret. Verification is a
//! pure function of the token, the keys and the supplied `now`, so there is
//! no session table and nothing to lock.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{AuthError, Principal, SessionClaims};

/// Lifetime of an issued token (1 hour).
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Signing and verification keys derived from the server secret.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller-supplied clock in `verify`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for `user_id`, valid from `now` for [`TOKEN_TTL_SECS`].
    pub fn issue(&self, user_id: &str, now: i64) -> Result<String, AuthError> {
        let claims = SessionClaims {
            user_id: user_id.to_string(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::InternalError(format!("token signing failed: {e}")))
    }

    /// Verify signature and expiry, returning the bound principal.
    pub fn verify(&self, token: &str, now: i64) -> Result<Principal, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            },
        )?;

        let claims = data.claims;
        if now >= claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(Principal::from_claims(claims))
    }
}
