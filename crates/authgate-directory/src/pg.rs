//! PostgreSQL user directory.
//!
//! Expects a table shaped like:
//!
//! ```sql
//! CREATE TABLE users (
//!     id            BIGINT PRIMARY KEY,
//!     username      TEXT NOT NULL UNIQUE,
//!     password_hash TEXT NOT NULL
//! );
//! ```
//!
//! The username is always sent as a bound parameter (`$1`), never spliced
//! into the SQL text.

use authgate_record::{CredentialRecord, UserId};
use sqlx::{FromRow, PgPool};

use crate::{DirectoryError, UserDirectory};

/// Row as selected from `users`.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
}

impl From<UserRow> for CredentialRecord {
    fn from(row: UserRow) -> Self {
        CredentialRecord::new(UserId(row.id), row.username, row.password_hash)
    }
}

/// A [`UserDirectory`] reading from a PostgreSQL `users` table.
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    /// Creates a directory over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserDirectory for PgUserDirectory {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<CredentialRecord>, DirectoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CredentialRecord::from))
    }
}
