//! Error types for the session layer.

use authgate_directory::DirectoryError;
use authgate_record::RecordError;
use authgate_store::StoreError;

/// Errors that can occur while logging users in and out.
///
/// A wrong password or an unknown username is NOT an error: both come back
/// as [`LoginOutcome::Rejected`](crate::LoginOutcome::Rejected), with no way
/// to tell them apart. Everything here means something underneath the
/// authentication logic failed.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The session store (or, during logout, the cache store) failed.
    /// Session state may be partially updated; callers should surface it.
    #[error("session or cache store failed: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// The user directory failed (a missing user is a rejection, not an error).
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Argon2 rejected its parameters or could not produce a hash.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// A session user could not be encoded for the cache mirror.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// The session holds something under the auth key that isn't a user.
    #[error("corrupt session entry: {0}")]
    CorruptSession(String),

    /// The configuration is unusable (bad session key or TTL).
    #[error("invalid configuration: {0}")]
    Config(String),
}
