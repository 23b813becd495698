//! Validated record type for collection storage.
//!
//! This module provides [`Record`], a type that guarantees the value is a
//! JSON object carrying the store-managed envelope fields.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, ValidationError};

/// Field holding a record's unique identifier.
pub const FIELD_ID: &str = "id";
/// Field holding a record's creation timestamp.
pub const FIELD_CREATED_AT: &str = "createdAt";
/// Field holding a record's last-modification timestamp.
pub const FIELD_UPDATED_AT: &str = "updatedAt";

/// A validated record from a collection.
///
/// This type guarantees that:
/// - The value is a JSON object
/// - `id`, `createdAt`, and `updatedAt` are present and are strings
///
/// These invariants are enforced at construction and deserialization time,
/// making it impossible to hold an invalid `Record`. Beyond the envelope the
/// record is schema-agnostic; interpretation of the remaining fields is left
/// to the repositories.
///
/// # Example
///
/// ```
/// use paddock_core::Record;
/// use serde_json::json;
///
/// let record = Record::new(json!({
///     "id": "b9d31a6e",
///     "createdAt": "2025-01-01T00:00:00.000Z",
///     "updatedAt": "2025-01-01T00:00:00.000Z",
///     "name": "tinyllama:latest"
/// }).as_object().unwrap().clone()).unwrap();
///
/// assert_eq!(record.id(), "b9d31a6e");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create a new `Record` from a field map.
    ///
    /// # Errors
    ///
    /// Returns an error if `id`, `createdAt`, or `updatedAt` is missing or
    /// not a string.
    pub fn new(fields: Map<String, Value>) -> Result<Self, Error> {
        Self::validate(&fields)?;
        Ok(Self(fields))
    }

    /// The record's unique identifier.
    pub fn id(&self) -> &str {
        // Safe: validated at construction
        self.0[FIELD_ID].as_str().unwrap()
    }

    /// When the record was created.
    pub fn created_at(&self) -> &str {
        // Safe: validated at construction
        self.0[FIELD_CREATED_AT].as_str().unwrap()
    }

    /// When the record was last modified.
    pub fn updated_at(&self) -> &str {
        // Safe: validated at construction
        self.0[FIELD_UPDATED_AT].as_str().unwrap()
    }

    /// Get a field from the record.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a reference to the full field map.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume and return the full field map.
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// Check whether every key/value pair in `query` matches this record
    /// exactly. Strict equality, not partial or fuzzy match.
    pub fn matches(&self, query: &Map<String, Value>) -> bool {
        query.iter().all(|(key, value)| self.0.get(key) == Some(value))
    }

    /// Deserialize the record into a typed domain struct.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(|e| {
            ValidationError::Record {
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn validate(fields: &Map<String, Value>) -> Result<(), Error> {
        for field in [FIELD_ID, FIELD_CREATED_AT, FIELD_UPDATED_AT] {
            match fields.get(field) {
                None => {
                    return Err(ValidationError::Record {
                        reason: format!("missing '{}' field", field),
                    }
                    .into());
                }
                Some(value) if !value.is_string() => {
                    return Err(ValidationError::Record {
                        reason: format!("'{}' field must be a string", field),
                    }
                    .into());
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Map::deserialize(deserializer)?;
        Record::new(fields).map_err(serde::de::Error::custom)
    }
}
