//! # Authgate
//!
//! Session-backed username/password authentication.
//!
//! Authgate checks credentials against a [`UserDirectory`], records the
//! logged-in user in a per-caller [`SessionStore`], and mirrors it into a
//! shared [`CacheStore`] under `user_session_<id>` for 24 hours. Passwords
//! are stored as salted Argon2id hashes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use authgate::prelude::*;
//!
//! # async fn demo(directory: MemoryUserDirectory) -> Result<(), AuthgateError> {
//! let service = AuthgateBuilder::new().build(
//!     directory,
//!     MemorySessionStore::fresh(),
//!     MemoryCacheStore::new(),
//! )?;
//!
//! if service.login("alice", "correct").await?.is_authenticated() {
//!     assert!(service.is_logged_in().await?);
//!     service.logout().await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature flags
//!
//! - `redis`: [`RedisCacheStore`](authgate_store::RedisCacheStore)
//! - `postgres`: [`PgUserDirectory`](authgate_directory::PgUserDirectory)
//!
//! [`UserDirectory`]: authgate_directory::UserDirectory
//! [`SessionStore`]: authgate_store::SessionStore
//! [`CacheStore`]: authgate_store::CacheStore

mod builder;
mod error;
pub mod telemetry;

pub use builder::{AuthgateBuilder, AuthgateConfig};
pub use error::AuthgateError;

/// Everything needed to build and use the service.
pub mod prelude {
    pub use crate::{AuthgateBuilder, AuthgateConfig, AuthgateError};

    pub use authgate_directory::{DirectoryError, MemoryUserDirectory, UserDirectory};
    pub use authgate_record::{Codec, CredentialRecord, JsonCodec, RecordError, SessionUser, UserId};
    pub use authgate_session::{
        AuthConfig, AuthError, AuthenticationService, LoginOutcome, PasswordConfig,
        PasswordHasher,
    };
    pub use authgate_store::{
        CacheStore, MemoryCacheStore, MemorySessionStore, SessionStore, StoreError,
    };

    #[cfg(feature = "postgres")]
    pub use authgate_directory::PgUserDirectory;
    #[cfg(feature = "redis")]
    pub use authgate_store::RedisCacheStore;
}
