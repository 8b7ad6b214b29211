//! The authentication service: login, logout, and "who is logged in".
//!
//! This is the only stateful piece of Authgate. It coordinates three
//! collaborators it does not own:
//!
//! - a [`UserDirectory`] to find credential records,
//! - a [`SessionStore`] for THIS caller's session (authoritative),
//! - a [`CacheStore`] shared by everyone, mirroring sessions with a TTL.
//!
//! ## Lifecycle
//!
//! ```text
//!              login() ok                 logout()
//! [Anonymous] ────────────→ [Authenticated] ────────→ [Anonymous]
//!      │                          │
//!      └─ login() rejected ─┐     └─ login() ok (re-login, replaces user)
//!         (no change)  ◄────┘
//! ```
//!
//! "Authenticated" means exactly one thing: the session holds a non-empty
//! `Auth.User.id`. The cache entry is a best-effort side channel; losing it
//! never changes who is logged in.

use authgate_directory::UserDirectory;
use authgate_record::{Codec, CredentialRecord, JsonCodec, RecordError, SessionUser, UserId};
use authgate_store::{CacheStore, SessionStore, StoreError};
use serde_json::Value;

use crate::{AuthConfig, AuthError, PasswordHasher};

// ---------------------------------------------------------------------------
// LoginOutcome
// ---------------------------------------------------------------------------

/// Result of a login attempt that reached a decision.
///
/// Unknown usernames and wrong passwords are both [`Rejected`](Self::Rejected):
/// callers get one signal, so a login form can't be used to probe which
/// usernames exist.
#[derive(Debug)]
#[must_use]
pub enum LoginOutcome {
    /// Credentials matched; the session now holds `user`.
    ///
    /// `cache_error` is set when the session was written but mirroring it
    /// into the cache failed. The login still stands (the session is
    /// authoritative); the error is handed back so the caller can report it.
    Authenticated {
        user: SessionUser,
        cache_error: Option<StoreError>,
    },

    /// Unknown username or wrong password. Nothing was written.
    Rejected,
}

impl LoginOutcome {
    /// `true` for [`Authenticated`](Self::Authenticated).
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// The logged-in user, if authentication succeeded.
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Self::Authenticated { user, .. } => Some(user),
            Self::Rejected => None,
        }
    }

    /// The cache mirror failure, if there was one.
    pub fn cache_error(&self) -> Option<&StoreError> {
        match self {
            Self::Authenticated { cache_error, .. } => cache_error.as_ref(),
            Self::Rejected => None,
        }
    }
}

// ---------------------------------------------------------------------------
// AuthenticationService
// ---------------------------------------------------------------------------

/// Session-backed login/logout for one session context.
///
/// Build one per request (or per session): the session store handle
/// identifies whose session this is, while the directory and cache handles
/// are typically shared clones.
///
/// `K` is the codec used for the cache mirror value; JSON unless you say
/// otherwise.
pub struct AuthenticationService<D, S, C, K = JsonCodec> {
    directory: D,
    session: S,
    cache: C,
    hasher: PasswordHasher,
    codec: K,
    config: AuthConfig,
}

impl<D, S, C> AuthenticationService<D, S, C, JsonCodec>
where
    D: UserDirectory,
    S: SessionStore,
    C: CacheStore,
{
    /// Creates a service that mirrors sessions as JSON.
    ///
    /// # Errors
    /// [`AuthError::Config`] if `config` fails [`AuthConfig::validated`].
    pub fn new(
        directory: D,
        session: S,
        cache: C,
        hasher: PasswordHasher,
        config: AuthConfig,
    ) -> Result<Self, AuthError> {
        Self::with_codec(directory, session, cache, hasher, JsonCodec, config)
    }
}

impl<D, S, C, K> AuthenticationService<D, S, C, K>
where
    D: UserDirectory,
    S: SessionStore,
    C: CacheStore,
    K: Codec,
{
    /// Creates a service with a custom cache codec.
    pub fn with_codec(
        directory: D,
        session: S,
        cache: C,
        hasher: PasswordHasher,
        codec: K,
        config: AuthConfig,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            directory,
            session,
            cache,
            hasher,
            codec,
            config: config.validated()?,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Checks `username`/`password` and, on success, records the user in
    /// the session and mirrors it into the cache.
    ///
    /// # Errors
    /// - [`AuthError::Directory`] if the directory lookup itself failed
    /// - [`AuthError::StoreUnavailable`] if the session could not be read or
    ///   written; the cache was not touched and the session is unchanged
    /// - [`AuthError::Record`] if the user could not be encoded for the
    ///   cache (checked before anything is written)
    ///
    /// A failed cache write is not an error; see
    /// [`LoginOutcome::Authenticated`].
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let Some(record) = self.directory.find_by_username(username).await? else {
            self.hasher.verify_dummy(password);
            tracing::debug!("login rejected");
            return Ok(LoginOutcome::Rejected);
        };

        if !self.password_matches(&record, password) {
            tracing::debug!("login rejected");
            return Ok(LoginOutcome::Rejected);
        }

        let user = record.session_user();
        let session_value = serde_json::to_value(&user).map_err(RecordError::Encode)?;
        let mirror_value = self.codec.encode(&user)?;

        let previous = self.session.read(&self.config.id_key()).await?;
        let previous = previous.as_ref().and_then(user_id_from_value);

        self.session.write(&self.config.session_key, session_value).await?;

        if let Some(previous) = previous.filter(|id| *id != user.id) {
            self.forget_mirror(previous).await;
        }

        let cache_error = self
            .cache
            .set(&self.config.cache_key(user.id), &mirror_value, self.config.cache_ttl())
            .await
            .err();

        match &cache_error {
            None => tracing::info!(user_id = %user.id, "user logged in"),
            Some(err) => tracing::warn!(
                user_id = %user.id,
                error = %err,
                "user logged in, but the session cache mirror failed"
            ),
        }

        Ok(LoginOutcome::Authenticated { user, cache_error })
    }

    /// Ends the session: drops the cache mirror (if the session names a
    /// user) and clears the session key. Safe to call when nobody is
    /// logged in.
    ///
    /// Always returns `Ok(true)` when the stores cooperate.
    ///
    /// # Errors
    /// [`AuthError::StoreUnavailable`] if a store fails. The session key is
    /// cleared even when the cache delete fails, so a cache outage can
    /// never keep someone logged in; the error is still returned.
    pub async fn logout(&self) -> Result<bool, AuthError> {
        let current = self.session.read(&self.config.id_key()).await?;
        let user_id = current.as_ref().and_then(user_id_from_value);

        let cache_result = match user_id {
            Some(id) => self.cache.delete(&self.config.cache_key(id)).await.map(|_| ()),
            None => Ok(()),
        };

        self.session.delete(&self.config.session_key).await?;

        if let Err(err) = cache_result {
            tracing::warn!(
                user_id = ?user_id,
                error = %err,
                "session cleared, but the cache mirror could not be removed"
            );
            return Err(err.into());
        }

        match user_id {
            Some(id) => tracing::info!(user_id = %id, "user logged out"),
            None => tracing::debug!("logout without an authenticated user"),
        }
        Ok(true)
    }

    /// `true` if this session holds a non-empty user id. Pure read.
    pub async fn is_logged_in(&self) -> Result<bool, AuthError> {
        Ok(self.session.check(&self.config.id_key()).await?)
    }

    /// The user recorded in this session, or `None` when anonymous.
    ///
    /// # Errors
    /// [`AuthError::CorruptSession`] if the session claims to be logged in
    /// but the stored entry doesn't decode as a user.
    pub async fn current_user(&self) -> Result<Option<SessionUser>, AuthError> {
        if !self.is_logged_in().await? {
            return Ok(None);
        }
        let Some(value) = self.session.read(&self.config.session_key).await? else {
            return Ok(None);
        };
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| AuthError::CorruptSession(e.to_string()))
    }

    /// Reads the cache mirror for `id`, if it is still there.
    ///
    /// A missing entry says nothing about the session itself.
    pub async fn mirrored_user(&self, id: UserId) -> Result<Option<SessionUser>, AuthError> {
        match self.cache.get(&self.config.cache_key(id)).await? {
            Some(text) => Ok(Some(self.codec.decode(&text)?)),
            None => Ok(None),
        }
    }

    fn password_matches(&self, record: &CredentialRecord, password: &str) -> bool {
        match self.hasher.verify(password, &record.password_hash) {
            Ok(matched) => matched,
            Err(err) => {
                // Legacy or corrupted hash. Treat as a mismatch so the user
                // gets the same answer as for a wrong password.
                tracing::warn!(user_id = %record.id, error = %err, "stored password hash is unusable");
                false
            }
        }
    }

    /// On re-login as a different user, removes the previous user's mirror
    /// so it doesn't outlive the session that created it. Runs only after
    /// the new session entry is written.
    async fn forget_mirror(&self, previous: UserId) {
        if let Err(err) = self.cache.delete(&self.config.cache_key(previous)).await {
            tracing::warn!(
                user_id = %previous,
                error = %err,
                "could not remove previous user's cache mirror"
            );
        }
    }
}

/// Extracts a user id from a session value. Accepts a JSON number or a
/// numeric string (`42` or `"42"`).
fn user_id_from_value(value: &Value) -> Option<UserId> {
    value
        .as_i64()
        .or_else(|| value.as_str()?.parse().ok())
        .map(UserId)
}
