//! User directory for Authgate.
//!
//! The directory answers one question: "what credential record belongs to
//! this username?" It is owned by the application (a users table, an LDAP
//! tree, a fixture in a test); the authentication service only reads it
//! through the [`UserDirectory`] trait.
//!
//! # Feature Flags
//!
//! - `postgres`: [`PgUserDirectory`] via `sqlx`, using bound parameters
//!   for every lookup

mod error;
mod memory;
#[cfg(feature = "postgres")]
mod pg;

pub use error::DirectoryError;
pub use memory::MemoryUserDirectory;
#[cfg(feature = "postgres")]
pub use pg::PgUserDirectory;

use std::future::Future;

use authgate_record::CredentialRecord;

/// Looks up credential records by username.
///
/// # Example
///
/// ```rust
/// use authgate_directory::{DirectoryError, UserDirectory};
/// use authgate_record::{CredentialRecord, UserId};
///
/// /// A directory with exactly one user.
/// struct SingleUser(CredentialRecord);
///
/// impl UserDirectory for SingleUser {
///     async fn find_by_username(
///         &self,
///         username: &str,
///     ) -> Result<Option<CredentialRecord>, DirectoryError> {
///         Ok((self.0.username == username).then(|| self.0.clone()))
///     }
/// }
/// ```
pub trait UserDirectory: Send + Sync + 'static {
    /// Returns the record for `username`, or `Ok(None)` if there is none.
    ///
    /// Matching is exact (case-sensitive); normalizing usernames is the
    /// directory owner's decision, not the authentication layer's.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<CredentialRecord>, DirectoryError>> + Send;
}
