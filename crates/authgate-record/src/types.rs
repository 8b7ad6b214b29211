//! Identity types shared by every Authgate layer.
//!
//! Two shapes of "a user" exist in this workspace:
//!
//! - [`CredentialRecord`]: what the user directory stores, including the
//!   password hash. Only the directory and the password check ever see it.
//! - [`SessionUser`]: the same identity with the secret stripped. This is
//!   what gets written into the session and mirrored into the cache.
//!
//! Keeping them as separate types means the compiler, not a code review,
//! stops a password hash from leaking into a store.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::RecordError;

// ---------------------------------------------------------------------------
// UserId
// ---------------------------------------------------------------------------

/// A unique identifier for a user.
///
/// Newtype over `i64` so it maps onto a `BIGINT` primary key and can't be
/// confused with other integers in function signatures.
///
/// `#[serde(transparent)]` serializes `UserId(42)` as plain `42`, which is
/// what session readers of `Auth.User.id` expect.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// Displays the bare number. Cache keys are built from this
/// (`user_session_42`), so it must not carry a prefix.
impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// CredentialRecord
// ---------------------------------------------------------------------------

/// Stored identity plus password hash for one user.
///
/// Owned by the user directory; the authentication service only reads it.
/// `password_hash` is a PHC string (`$argon2id$v=19$...`), never a
/// plaintext password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
}

impl CredentialRecord {
    /// Creates a record from already-hashed credentials.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Checks the record is usable for a password check.
    ///
    /// # Errors
    /// Returns [`RecordError::Invalid`] if the username is empty or the
    /// hash is not in PHC form (it must start with `$`). A plain digest
    /// such as an unsalted MD5 hex string is rejected here.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.username.is_empty() {
            return Err(RecordError::Invalid("username is empty".into()));
        }
        if !self.password_hash.starts_with('$') {
            return Err(RecordError::Invalid(format!(
                "password hash for {} is not a PHC string",
                self.username
            )));
        }
        Ok(())
    }

    /// Returns the non-secret part of this record.
    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Manual `Debug` so the hash never ends up in a log line via `{:?}`.
impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// SessionUser
// ---------------------------------------------------------------------------

/// The authenticated identity as stored in the session and the cache.
///
/// In JSON this is `{ "id": 42, "username": "alice" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub username: String,
}

impl From<&CredentialRecord> for SessionUser {
    fn from(record: &CredentialRecord) -> Self {
        record.session_user()
    }
}
