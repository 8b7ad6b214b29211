//! Builder for a ready-to-use [`AuthenticationService`].

use authgate_directory::UserDirectory;
use authgate_session::{AuthConfig, AuthenticationService, PasswordConfig, PasswordHasher};
use authgate_store::{CacheStore, SessionStore};
use serde::{Deserialize, Serialize};

use crate::AuthgateError;

/// Everything Authgate reads from an application's config file.
///
/// Every section and every field is optional and falls back to its
/// default, so a file only lists what it changes:
///
/// ```json
/// { "auth": { "cache_key_prefix": "sess_", "cache_ttl_secs": 3600 }, "password": { "iterations": 3 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthgateConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

/// Builder for configuring and constructing an [`AuthenticationService`].
///
/// # Example
///
/// ```rust,no_run
/// use authgate::prelude::*;
///
/// # fn demo() -> Result<(), AuthgateError> {
/// let service = AuthgateBuilder::new()
///     .password(PasswordConfig::default())
///     .build(
///         MemoryUserDirectory::new(),
///         MemorySessionStore::fresh(),
///         MemoryCacheStore::new(),
///     )?;
/// # let _ = service;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AuthgateBuilder {
    config: AuthgateConfig,
}

impl AuthgateBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a loaded [`AuthgateConfig`].
    pub fn from_config(config: AuthgateConfig) -> Self {
        Self { config }
    }

    /// Sets the session/cache layout and TTL.
    pub fn config(mut self, config: AuthConfig) -> Self {
        self.config.auth = config;
        self
    }

    /// Sets the Argon2id cost parameters for new hashes.
    pub fn password(mut self, config: PasswordConfig) -> Self {
        self.config.password = config;
        self
    }

    /// Builds a hasher on its own, for seeding directories with hashes
    /// that match what the service will produce.
    pub fn hasher(&self) -> Result<PasswordHasher, AuthgateError> {
        Ok(PasswordHasher::new(self.config.password)?)
    }

    /// Builds the service over the given directory and stores.
    ///
    /// # Errors
    /// [`AuthgateError::Auth`] if the configuration is invalid or Argon2
    /// rejects the password parameters.
    pub fn build<D, S, C>(
        self,
        directory: D,
        session: S,
        cache: C,
    ) -> Result<AuthenticationService<D, S, C>, AuthgateError>
    where
        D: UserDirectory,
        S: SessionStore,
        C: CacheStore,
    {
        let hasher = self.hasher()?;
        tracing::debug!(
            session_key = %self.config.auth.session_key,
            cache_ttl_secs = self.config.auth.cache_ttl_secs,
            "building authentication service"
        );
        Ok(AuthenticationService::new(
            directory,
            session,
            cache,
            hasher,
            self.config.auth,
        )?)
    }
}
