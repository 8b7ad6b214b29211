//! In-memory user directory, for tests, demos, and fixed user lists.

use std::collections::HashMap;
use std::sync::Arc;

use authgate_record::CredentialRecord;
use tokio::sync::RwLock;

use crate::{DirectoryError, UserDirectory};

/// A [`UserDirectory`] backed by a `HashMap` keyed by username.
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserDirectory {
    users: Arc<RwLock<HashMap<String, CredentialRecord>>>,
}

impl MemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record.
    ///
    /// # Errors
    /// - [`DirectoryError::InvalidRecord`] if the record fails validation
    ///   (empty username, hash not in PHC form)
    /// - [`DirectoryError::DuplicateUsername`] if the username is taken
    pub async fn insert(&self, record: CredentialRecord) -> Result<(), DirectoryError> {
        record.validate()?;

        let mut users = self.users.write().await;
        if users.contains_key(&record.username) {
            return Err(DirectoryError::DuplicateUsername(record.username));
        }
        tracing::debug!(user_id = %record.id, username = %record.username, "directory insert");
        users.insert(record.username.clone(), record);
        Ok(())
    }

    /// Number of records.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns `true` if the directory holds no records.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserDirectory for MemoryUserDirectory {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<CredentialRecord>, DirectoryError> {
        Ok(self.users.read().await.get(username).cloned())
    }
}
