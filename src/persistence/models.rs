//! Database models for user records.

use serde::{Deserialize, Serialize};

/// A new user record to be inserted into the `usuarios` table.
///
/// The password is stored exactly as received — the source system
/// performs no hashing, and that behavior is preserved here. See
/// DESIGN.md for the security flag on this decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Full name, stored in the `nombres_completos` column.
    pub full_name: String,
    /// Email address, stored in the `email` column.
    pub email: String,
    /// Opaque password string, stored as-is in the `pw` column.
    pub password: String,
}
