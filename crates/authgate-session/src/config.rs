//! Configuration for the authentication service and password hashing.
//!
//! Both structs derive `Serialize`/`Deserialize` so an embedding
//! application can load them from its own config file, and `Default` so
//! tests and demos can start from sensible values and override a field or
//! two.

use std::time::Duration;

use authgate_record::UserId;
use authgate_store::SessionPath;
use serde::{Deserialize, Serialize};

use crate::AuthError;

// ---------------------------------------------------------------------------
// AuthConfig
// ---------------------------------------------------------------------------

/// Where the service keeps session state, and for how long the cache
/// mirror lives.
///
/// Missing fields fall back to their defaults when deserializing, so a
/// config file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Session path holding the logged-in user. Default: `"Auth.User"`.
    /// The user id is read from `<session_key>.id`.
    pub session_key: String,

    /// Prefix of cache keys; the user id is appended.
    /// Default: `"user_session_"` → `user_session_42`.
    pub cache_key_prefix: String,

    /// Lifetime of a cache mirror entry, in whole seconds.
    /// Default: 86400 (24 hours).
    pub cache_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_key: "Auth.User".to_string(),
            cache_key_prefix: "user_session_".to_string(),
            cache_ttl_secs: 86_400,
        }
    }
}

impl AuthConfig {
    /// Checks the config and returns it unchanged if usable.
    ///
    /// # Errors
    /// [`AuthError::Config`] if the session key is not a valid dotted path
    /// or the cache TTL is shorter than one second.
    pub fn validated(self) -> Result<Self, AuthError> {
        SessionPath::parse(&self.session_key).map_err(|e| AuthError::Config(e.to_string()))?;
        if self.cache_ttl_secs == 0 {
            return Err(AuthError::Config(
                "cache_ttl_secs must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }

    /// Lifetime of a cache mirror entry.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Session path of the logged-in user's id (`Auth.User.id`).
    pub fn id_key(&self) -> String {
        format!("{}.id", self.session_key)
    }

    /// Cache key mirroring `id`'s session (`user_session_42`).
    pub fn cache_key(&self, id: UserId) -> String {
        format!("{}{}", self.cache_key_prefix, id)
    }
}

// ---------------------------------------------------------------------------
// PasswordConfig
// ---------------------------------------------------------------------------

/// Argon2id cost parameters.
///
/// The defaults follow the OWASP minimum for Argon2id (19 MiB, 2 passes,
/// 1 lane). Parameters are stored inside every hash, so raising them later
/// only affects newly hashed passwords; old hashes keep verifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// Memory cost in KiB. Must be at least `8 * parallelism`.
    pub memory_kib: u32,
    /// Number of passes over memory.
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}
