//! Unified error type for Authgate.

use authgate_directory::DirectoryError;
use authgate_record::RecordError;
use authgate_session::AuthError;
use authgate_store::StoreError;

/// Top-level error that wraps every layer's error.
///
/// Code using the `authgate` crate matches on this one type; `?` converts
/// from each layer's error through the `#[from]` impls.
#[derive(Debug, thiserror::Error)]
pub enum AuthgateError {
    /// Login/logout failed underneath the authentication logic.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A session or cache store failed outside a login/logout call
    /// (connecting, seeding).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The user directory failed outside a login call.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// A record failed validation or (de)serialization.
    #[error(transparent)]
    Record(#[from] RecordError),
}
