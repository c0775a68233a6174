//! User service: persists registration requests through the pooled store.

use std::sync::Arc;

use crate::error::DbError;
use crate::persistence::models::NewUser;
use crate::persistence::mysql::Database;

/// Parameterized INSERT for one user row. Values bind positionally:
/// full name, email, password.
const INSERT_USER_SQL: &str =
    "INSERT INTO usuarios (nombres_completos, email, pw) VALUES (?, ?, ?)";

/// Orchestration layer for user registration.
///
/// Stateless coordinator: owns a handle to the pooled [`Database`] and
/// issues the fixed INSERT on behalf of the registration handler. No
/// uniqueness check and no password hashing happen here — the record is
/// persisted exactly as validated by the handler.
#[derive(Debug, Clone)]
pub struct UserService {
    db: Arc<Database>,
}

impl UserService {
    /// Creates a new `UserService`.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Returns a reference to the underlying [`Database`].
    #[must_use]
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// Inserts one user record into the `usuarios` table.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] when the INSERT fails for any reason
    /// (connectivity, constraint violation, syntax). The caller decides
    /// how much of that failure to expose.
    pub async fn register(&self, user: &NewUser) -> Result<(), DbError> {
        let result = self
            .db
            .execute(
                INSERT_USER_SQL,
                &[
                    user.full_name.as_str(),
                    user.email.as_str(),
                    user.password.as_str(),
                ],
            )
            .await?;

        tracing::info!(
            rows = result.rows_affected(),
            user_id = result.last_insert_id(),
            "user registered"
        );
        Ok(())
    }
}
