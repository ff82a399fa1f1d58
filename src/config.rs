// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`AppConfig`] struct that is loaded once at startup and handed to the
//! services that need it. Business logic never reads the environment.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | Secret used to sign session tokens | Required (fixed value only with `dev` feature) |
//! | `DATA_DIR` | Directory holding the document store file | `./data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `ARGON2_MEMORY_KIB` | Password hash memory cost | `19456` |
//! | `ARGON2_ITERATIONS` | Password hash time cost | `2` |
//! | `ARGON2_PARALLELISM` | Password hash lanes | `1` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::path::PathBuf;
use std::str::FromStr;

use crate::auth::password::HashCost;

/// Environment variable name for the token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the data directory path.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

pub const ARGON2_MEMORY_KIB_ENV: &str = "ARGON2_MEMORY_KIB";
pub const ARGON2_ITERATIONS_ENV: &str = "ARGON2_ITERATIONS";
pub const ARGON2_PARALLELISM_ENV: &str = "ARGON2_PARALLELISM";

/// Environment variable selecting `json` or `pretty` log output.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// File name of the document store inside `DATA_DIR`.
pub const DATABASE_FILE: &str = "notes.redb";

/// Signing secret used when `JWT_SECRET` is absent in a `dev` build.
#[cfg(feature = "dev")]
const DEV_JWT_SECRET: &str = "relational-notes-dev-secret";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Read the format from the process environment.
    ///
    /// Read separately from [`AppConfig`]: tracing is initialised before
    /// the config loads so that config errors are logged.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unknown values fall back to [`LogFormat::Pretty`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(LOG_FORMAT_ENV) {
            Some(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Process-wide configuration, loaded once at startup.
#[derive(Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub hash_cost: HashCost,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"<redacted>")
            .field("data_dir", &self.data_dir)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("hash_cost", &self.hash_cost)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = match lookup(JWT_SECRET_ENV).filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => fallback_secret()?,
        };

        let defaults = HashCost::default();
        let hash_cost = HashCost {
            memory_kib: parse_or(&lookup, ARGON2_MEMORY_KIB_ENV, defaults.memory_kib)?,
            iterations: parse_or(&lookup, ARGON2_ITERATIONS_ENV, defaults.iterations)?,
            parallelism: parse_or(&lookup, ARGON2_PARALLELISM_ENV, defaults.parallelism)?,
        };

        Ok(Self {
            jwt_secret,
            data_dir: lookup(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            host: lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, PORT_ENV, DEFAULT_PORT)?,
            hash_cost,
        })
    }

    /// Path to the document store file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(feature = "dev")]
fn fallback_secret() -> Result<String, ConfigError> {
    tracing::warn!("{JWT_SECRET_ENV} not set, using the development signing secret");
    Ok(DEV_JWT_SECRET.to_string())
}

#[cfg(not(feature = "dev"))]
fn fallback_secret() -> Result<String, ConfigError> {
    Err(ConfigError::MissingSecret)
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[(JWT_SECRET_ENV, "s3cret")])).unwrap();

        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.hash_cost, HashCost::default());
        assert_eq!(config.database_path(), PathBuf::from("./data/notes.redb"));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (JWT_SECRET_ENV, "s3cret"),
            (DATA_DIR_ENV, "/var/lib/notes"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "9000"),
            (ARGON2_MEMORY_KIB_ENV, "4096"),
            (ARGON2_ITERATIONS_ENV, "3"),
            (ARGON2_PARALLELISM_ENV, "2"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.database_path(), PathBuf::from("/var/lib/notes/notes.redb"));
        assert_eq!(
            config.hash_cost,
            HashCost {
                memory_kib: 4096,
                iterations: 3,
                parallelism: 2,
            }
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result =
            AppConfig::from_lookup(lookup_from(&[(JWT_SECRET_ENV, "s3cret"), (PORT_ENV, "http")]));
        assert!(matches!(result, Err(ConfigError::Invalid { name: PORT_ENV, .. })));
    }

    #[cfg(not(feature = "dev"))]
    #[test]
    fn missing_secret_fails_closed() {
        let result = AppConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingSecret)));

        let result = AppConfig::from_lookup(lookup_from(&[(JWT_SECRET_ENV, "")]));
        assert!(matches!(result, Err(ConfigError::MissingSecret)));
    }

    #[test]
    fn log_format_defaults_to_pretty() {
        assert_eq!(LogFormat::from_lookup(lookup_from(&[])), LogFormat::Pretty);
        assert_eq!(
            LogFormat::from_lookup(lookup_from(&[(LOG_FORMAT_ENV, "yaml")])),
            LogFormat::Pretty
        );
        assert_eq!(
            LogFormat::from_lookup(lookup_from(&[(LOG_FORMAT_ENV, "JSON")])),
            LogFormat::Json
        );
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config = AppConfig::from_lookup(lookup_from(&[(JWT_SECRET_ENV, "s3cret")])).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
