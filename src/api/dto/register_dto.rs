//! Registration request DTO and presence validation.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::persistence::models::NewUser;

/// Request body for `POST /api/register`.
///
/// All three fields are required; presence is validated explicitly so a
/// missing or empty field produces the fixed 400 response rather than a
/// deserialization error. Unknown extra keys are accepted and ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Full name of the user.
    #[serde(default)]
    pub nombre: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Password, treated as an opaque string.
    #[serde(default)]
    pub password: Option<String>,
}

impl RegisterRequest {
    /// Validates field presence and converts into a [`NewUser`].
    ///
    /// Returns `None` when any field is absent or an empty string —
    /// whitespace-only values count as present, matching the source
    /// system's truthiness check.
    #[must_use]
    pub fn into_new_user(self) -> Option<NewUser> {
        let full_name = non_empty(self.nombre)?;
        let email = non_empty(self.email)?;
        let password = non_empty(self.password)?;

        Some(NewUser {
            full_name,
            email,
            password,
        })
    }
}

/// Keeps a field only when it is present and non-empty.
fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
