//! Password hashing and verification.
//!
//! Passwords are hashed with Argon2id under a fresh random salt and stored
//! as PHC strings:
//!
//! ```text
//! $argon2id$v=19$m=19456,t=2,p=1$<salt, base64>$<digest, base64>
//! ```
//!
//! The string carries everything needed to verify it later (algorithm,
//! cost, salt), so verification never depends on the current
//! [`PasswordConfig`].
//!
//! # Timing
//!
//! Digest comparison inside `verify_password` is constant-time. To keep
//! "unknown user" as slow as "wrong password", the service also runs a
//! verification against a throwaway hash ([`PasswordHasher::verify_dummy`])
//! when the directory has no record.

use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::Rng;

use crate::{AuthError, PasswordConfig};

/// Hashes and verifies passwords with Argon2id.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
    /// Hash of a random secret nobody knows; see [`Self::verify_dummy`].
    dummy_hash: String,
}

impl PasswordHasher {
    /// Creates a hasher with the given cost parameters.
    ///
    /// # Errors
    /// [`AuthError::Hashing`] if Argon2 rejects the parameters (for
    /// example memory below `8 * parallelism` KiB, or zero iterations).
    pub fn new(config: PasswordConfig) -> Result<Self, AuthError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(hashing)?;

        let mut hasher = Self {
            params,
            dummy_hash: String::new(),
        };
        let secret: [u8; 32] = rand::rng().random();
        hasher.dummy_hash = hasher.hash_bytes(&secret)?;
        Ok(hasher)
    }

    /// Hashes `password` under a new random salt and returns a PHC string.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        self.hash_bytes(password.as_bytes())
    }

    /// Checks `password` against a stored PHC string.
    ///
    /// Returns `Ok(false)` on a mismatch.
    ///
    /// # Errors
    /// [`AuthError::Hashing`] if `phc` is not a valid hash string or uses
    /// unsupported parameters.
    pub fn verify(&self, password: &str, phc: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(phc).map_err(hashing)?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(hashing(e)),
        }
    }

    /// Spends the same effort as a real verification and always fails.
    pub fn verify_dummy(&self, password: &str) {
        // The outcome is irrelevant; only the time spent matters.
        let _ = self.verify(password, &self.dummy_hash);
    }

    fn hash_bytes(&self, password: &[u8]) -> Result<String, AuthError> {
        let salt = generate_salt()?;
        let hash = self
            .argon2()
            .hash_password(password, &salt)
            .map_err(hashing)?;
        Ok(hash.to_string())
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("memory_kib", &self.params.m_cost())
            .field("iterations", &self.params.t_cost())
            .field("parallelism", &self.params.p_cost())
            .finish_non_exhaustive()
    }
}

/// 16 random bytes (128 bits), base64-encoded as a PHC salt.
fn generate_salt() -> Result<SaltString, AuthError> {
    let bytes: [u8; 16] = rand::rng().random();
    SaltString::encode_b64(&bytes).map_err(hashing)
}

fn hashing(err: impl std::fmt::Display) -> AuthError {
    AuthError::Hashing(err.to_string())
}
