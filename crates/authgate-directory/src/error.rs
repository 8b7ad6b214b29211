//! Error types for the directory layer.

use authgate_record::RecordError;

/// Errors that can occur while looking up credential records.
///
/// "No such user" is NOT an error; lookups return `Ok(None)` for that.
/// These variants all mean the directory itself is misbehaving.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The backing directory could not be reached.
    #[error("directory unavailable: {0}")]
    Unavailable(String),

    /// A record failed validation on its way into the directory.
    #[error(transparent)]
    InvalidRecord(#[from] RecordError),

    /// Two records claim the same username.
    #[error("username {0:?} is already taken")]
    DuplicateUsername(String),

    /// A query against PostgreSQL failed.
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
