//! User account repository.
//!
//! Domain wrapper over the `users` collection. Owns password hashing and
//! the default-admin bootstrap; every read path hands out the sanitized
//! [`User`] type, so the stored bcrypt hash never leaves this module.

use bcrypt::{DEFAULT_COST, hash, verify};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use paddock_core::error::ValidationError;
use paddock_core::{NewUser, Preferences, PreferencesPatch, ProfileUpdate, Result, Role, User};

use crate::store::{FileCollection, timestamp, to_json};

/// Email of the bootstrap admin account.
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Username of the bootstrap admin account.
const ADMIN_USERNAME: &str = "admin";

/// Password the bootstrap admin account starts with.
const ADMIN_DEFAULT_PASSWORD: &str = "admin123";

/// Field holding the bcrypt hash in stored records. Never present on
/// [`User`].
const FIELD_PASSWORD: &str = "password";

fn hash_password(plaintext: &str) -> Result<String> {
    hash(plaintext, DEFAULT_COST).map_err(|e| {
        ValidationError::Other {
            message: e.to_string(),
        }
        .into()
    })
}

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    collection: FileCollection,
}

impl UserRepository {
    /// Wrap an owned collection handle.
    pub fn new(collection: FileCollection) -> Self {
        Self { collection }
    }

    /// Ensure the backing file exists.
    pub fn initialize(&self) -> Result<()> {
        self.collection.initialize()
    }

    /// Ensure the default admin account exists.
    ///
    /// Gated on an email lookup, so repeated calls never create a second
    /// admin. Returns whether a record was created.
    #[instrument(skip(self))]
    pub fn bootstrap_admin(&self) -> Result<bool> {
        if self.find_by_email(ADMIN_EMAIL)?.is_some() {
            return Ok(false);
        }

        let mut fields = Map::new();
        fields.insert(
            "username".to_string(),
            Value::String(ADMIN_USERNAME.to_string()),
        );
        fields.insert("email".to_string(), Value::String(ADMIN_EMAIL.to_string()));
        fields.insert(
            FIELD_PASSWORD.to_string(),
            Value::String(hash_password(ADMIN_DEFAULT_PASSWORD)?),
        );
        fields.insert(
            "role".to_string(),
            Value::String(Role::Admin.as_str().to_string()),
        );
        fields.insert("preferences".to_string(), to_json(&Preferences::default())?);

        self.collection.create(fields)?;
        info!(email = ADMIN_EMAIL, "Created default admin account");
        Ok(true)
    }

    /// Look up a user by email. Input is lowercased before matching the
    /// stored, already-lowercased email.
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut query = Map::new();
        query.insert("email".to_string(), Value::String(email.to_lowercase()));
        self.collection
            .find_one(&query)?
            .as_ref()
            .map(|r| r.to_typed())
            .transpose()
    }

    /// User with the given id, if present.
    pub fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        self.collection
            .find_by_id(id)?
            .as_ref()
            .map(|r| r.to_typed())
            .transpose()
    }

    /// Register a user account.
    ///
    /// The password is stored only as a bcrypt hash, the email is
    /// lowercased, and the role is always `user`; privilege cannot be
    /// self-assigned at creation. Email uniqueness stays a caller concern,
    /// checked with [`find_by_email`](Self::find_by_email) before calling.
    pub fn create(&self, user: NewUser) -> Result<User> {
        for (field, value) in [
            ("username", &user.username),
            ("email", &user.email),
            ("password", &user.password),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField { field }.into());
            }
        }

        let mut fields = Map::new();
        fields.insert("username".to_string(), Value::String(user.username));
        fields.insert(
            "email".to_string(),
            Value::String(user.email.to_lowercase()),
        );
        fields.insert(
            FIELD_PASSWORD.to_string(),
            Value::String(hash_password(&user.password)?),
        );
        fields.insert(
            "role".to_string(),
            Value::String(Role::User.as_str().to_string()),
        );
        fields.insert("preferences".to_string(), to_json(&Preferences::default())?);

        let record = self.collection.create(fields)?;
        debug!(id = record.id(), "Registered user");
        record.to_typed()
    }

    /// Check a candidate password against the stored hash.
    ///
    /// Returns `Ok(false)` on mismatch, a missing record, or an unreadable
    /// hash; store I/O failures still propagate.
    pub fn verify_password(&self, user: &User, candidate: &str) -> Result<bool> {
        let Some(record) = self.collection.find_by_id(&user.id)? else {
            return Ok(false);
        };
        let Some(stored) = record.get(FIELD_PASSWORD).and_then(Value::as_str) else {
            return Ok(false);
        };
        Ok(verify(candidate, stored).unwrap_or(false))
    }

    /// Look up by email and verify the password, stamping `lastLogin` on
    /// success. Returns `None` for an unknown email or a wrong password.
    #[instrument(skip(self, password))]
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.find_by_email(email)? else {
            return Ok(None);
        };
        if !self.verify_password(&user, password)? {
            return Ok(None);
        }

        debug!(id = %user.id, "Authenticated user");
        self.update_last_login(&user.id)
    }

    /// Merge a partial preference update onto the stored preferences.
    pub fn update_preferences(
        &self,
        id: &str,
        patch: PreferencesPatch,
    ) -> Result<Option<User>> {
        let Some(user) = self.find_by_id(id)? else {
            return Ok(None);
        };

        let preferences = Preferences {
            theme: patch.theme.unwrap_or(user.preferences.theme),
            default_model: patch.default_model.unwrap_or(user.preferences.default_model),
        };

        let mut fields = Map::new();
        fields.insert("preferences".to_string(), to_json(&preferences)?);
        self.collection
            .update(id, fields)?
            .as_ref()
            .map(|r| r.to_typed())
            .transpose()
    }

    /// Stamp the last-login timestamp with the store clock.
    pub fn update_last_login(&self, id: &str) -> Result<Option<User>> {
        let mut fields = Map::new();
        fields.insert("lastLogin".to_string(), Value::String(timestamp()));
        self.collection
            .update(id, fields)?
            .as_ref()
            .map(|r| r.to_typed())
            .transpose()
    }

    /// Apply a partial profile update.
    ///
    /// A new password is re-hashed and a new email lowercased before
    /// storage.
    pub fn update_profile(&self, id: &str, update: ProfileUpdate) -> Result<Option<User>> {
        let mut fields = Map::new();
        if let Some(username) = update.username {
            fields.insert("username".to_string(), Value::String(username));
        }
        if let Some(email) = update.email {
            fields.insert("email".to_string(), Value::String(email.to_lowercase()));
        }
        if let Some(password) = update.password {
            fields.insert(
                FIELD_PASSWORD.to_string(),
                Value::String(hash_password(&password)?),
            );
        }

        if fields.is_empty() {
            return self.find_by_id(id);
        }

        self.collection
            .update(id, fields)?
            .as_ref()
            .map(|r| r.to_typed())
            .transpose()
    }
}
