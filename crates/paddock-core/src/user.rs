//! User account record types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Access level of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular dashboard user.
    User,
    /// Administrator.
    Admin,
}

impl Role {
    /// The role as its on-disk string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-user dashboard preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// UI theme.
    pub theme: String,
    /// Model preselected for new chats.
    pub default_model: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            default_model: "llama2".to_string(),
        }
    }
}

/// Partial preference update; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct PreferencesPatch {
    /// New UI theme.
    pub theme: Option<String>,
    /// New default chat model.
    pub default_model: Option<String>,
}

/// A user account as handed out by the repository.
///
/// Deliberately carries no password field. The stored record keeps the
/// bcrypt hash, and it never crosses this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier.
    pub id: String,
    /// Display name. Not guaranteed unique.
    pub username: String,
    /// Lowercased email address. The de facto unique key.
    pub email: String,
    /// Access level.
    pub role: Role,
    /// Dashboard preferences.
    pub preferences: Preferences,
    /// When the account last authenticated, if ever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    /// When the record was created.
    pub created_at: String,
    /// When the record was last modified.
    pub updated_at: String,
}

/// Input for registering a user account.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub username: String,
    /// Email address; lowercased before storage.
    pub email: String,
    /// Plaintext password; stored only as a bcrypt hash.
    pub password: String,
}

/// Partial profile update; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New display name.
    pub username: Option<String>,
    /// New email address; lowercased before storage.
    pub email: Option<String>,
    /// New plaintext password; re-hashed before storage.
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_ignores_stored_password_field() {
        let user: User = serde_json::from_value(json!({
            "id": "1",
            "username": "alice",
            "email": "alice@example.com",
            "password": "$2b$12$abcdefghijklmnopqrstuv",
            "role": "user",
            "preferences": {"theme": "light", "defaultModel": "llama2"},
            "createdAt": "2025-01-01T00:00:00.000Z",
            "updatedAt": "2025-01-01T00:00:00.000Z"
        }))
        .unwrap();

        let serialized = serde_json::to_value(&user).unwrap();
        assert!(serialized.get("password").is_none());
        assert_eq!(serialized["preferences"]["defaultModel"], "llama2");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_default_preferences() {
        let preferences = Preferences::default();
        assert_eq!(preferences.theme, "light");
        assert_eq!(preferences.default_model, "llama2");
    }
}
