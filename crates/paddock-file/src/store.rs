//! File-backed collection storage.
//!
//! Each collection is one file holding a pretty-printed JSON array of
//! records. Every mutation is a full read-modify-write cycle, serialized by
//! an in-process mutex shared across clones of the handle. Writes land via
//! a temp-file-then-rename so an interrupted write never truncates the
//! collection.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use paddock_core::error::{CorruptError, StorageError, ValidationError};
use paddock_core::record::{FIELD_CREATED_AT, FIELD_ID, FIELD_UPDATED_AT};
use paddock_core::{Record, Result};

/// Current time in the store's on-disk timestamp format: RFC 3339 UTC with
/// millisecond precision and a `Z` suffix.
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Encode a domain value as a JSON field value.
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| {
        ValidationError::Other {
            message: e.to_string(),
        }
        .into()
    })
}

/// A single collection of records backed by one JSON file.
///
/// Clones share the collection mutex, so every handle to the same
/// collection participates in the same read-modify-write serialization.
#[derive(Debug, Clone)]
pub struct FileCollection {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileCollection {
    /// Create a handle for the collection file at `path`.
    ///
    /// No I/O happens until [`initialize`](Self::initialize) or the first
    /// operation.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // A poisoned lock only means another thread panicked mid-cycle; the
        // file itself stays consistent thanks to the rename-based write.
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn io_err(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Ensure the backing file exists, creating it with an empty record
    /// array if absent. Idempotent; safe to call on every startup.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn initialize(&self) -> Result<()> {
        let _guard = self.guard();

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        if !self.path.exists() {
            self.persist(&[])?;
            debug!("Created empty collection file");
        }

        Ok(())
    }

    fn load(&self) -> Result<Vec<Record>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Collection file missing, reading as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_err(e).into()),
        };

        serde_json::from_str(&content).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Collection file is corrupt");
            CorruptError::new(&self.path, e.to_string()).into()
        })
    }

    fn persist(&self, records: &[Record]) -> Result<()> {
        let content = serde_json::to_string_pretty(records).map_err(|e| StorageError::Encode {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content).map_err(|e| self.io_err(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| self.io_err(e))?;

        Ok(())
    }

    /// Read the full collection in file order.
    pub fn read_all(&self) -> Result<Vec<Record>> {
        let _guard = self.guard();
        self.load()
    }

    /// Overwrite the collection with `records`.
    pub fn write_all(&self, records: &[Record]) -> Result<()> {
        let _guard = self.guard();
        self.persist(records)
    }

    /// First record whose fields equal every key/value pair in `query`.
    pub fn find_one(&self, query: &Map<String, Value>) -> Result<Option<Record>> {
        Ok(self.read_all()?.into_iter().find(|r| r.matches(query)))
    }

    /// Record with the given id, if present.
    pub fn find_by_id(&self, id: &str) -> Result<Option<Record>> {
        Ok(self.read_all()?.into_iter().find(|r| r.id() == id))
    }

    /// Append a new record built from `fields`.
    ///
    /// The store assigns `id`, `createdAt`, and `updatedAt`; entries for
    /// those fields in `fields` are replaced.
    #[instrument(skip(self, fields), fields(path = %self.path.display()))]
    pub fn create(&self, mut fields: Map<String, Value>) -> Result<Record> {
        let _guard = self.guard();
        let mut records = self.load()?;

        let now = timestamp();
        fields.insert(
            FIELD_ID.to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );
        fields.insert(FIELD_CREATED_AT.to_string(), Value::String(now.clone()));
        fields.insert(FIELD_UPDATED_AT.to_string(), Value::String(now));

        let record = Record::new(fields)?;
        records.push(record.clone());
        self.persist(&records)?;

        debug!(id = record.id(), "Created record");
        Ok(record)
    }

    /// Shallow-merge `patch` onto the record with the given id.
    ///
    /// Returns `None` without writing when the id is absent. `id` and
    /// `createdAt` are immutable; patch entries naming them (or
    /// `updatedAt`, which the store refreshes itself) are ignored.
    #[instrument(skip(self, patch), fields(path = %self.path.display()))]
    pub fn update(&self, id: &str, patch: Map<String, Value>) -> Result<Option<Record>> {
        let _guard = self.guard();
        let mut records = self.load()?;

        let Some(index) = records.iter().position(|r| r.id() == id) else {
            return Ok(None);
        };

        let mut fields = records[index].clone().into_fields();
        for (key, value) in patch {
            if key == FIELD_ID || key == FIELD_CREATED_AT || key == FIELD_UPDATED_AT {
                continue;
            }
            fields.insert(key, value);
        }
        fields.insert(FIELD_UPDATED_AT.to_string(), Value::String(timestamp()));

        let record = Record::new(fields)?;
        records[index] = record.clone();
        self.persist(&records)?;

        debug!(id, "Updated record");
        Ok(Some(record))
    }

    /// Remove the record with the given id. A missing id is a no-op, not an
    /// error.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.guard();
        let mut records = self.load()?;

        let before = records.len();
        records.retain(|r| r.id() != id);

        if records.len() != before {
            self.persist(&records)?;
            debug!(id, "Deleted record");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_core::Error;
    use serde_json::json;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn collection(dir: &TempDir) -> FileCollection {
        let collection = FileCollection::new(dir.path().join("records.json"));
        collection.initialize().unwrap();
        collection
    }

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let collection = collection(&dir);

        collection
            .create(fields(json!({"name": "tinyllama"})))
            .unwrap();
        collection.initialize().unwrap();

        assert_eq!(collection.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_create_then_find_by_id_round_trips() {
        let dir = TempDir::new().unwrap();
        let collection = collection(&dir);

        let created = collection
            .create(fields(json!({"name": "tinyllama", "size": 637})))
            .unwrap();
        let found = collection.find_by_id(created.id()).unwrap().unwrap();

        assert_eq!(found, created);
        assert_eq!(found.get("name").unwrap(), "tinyllama");
        assert_eq!(found.get("size").unwrap(), 637);
        assert_eq!(found.created_at(), found.updated_at());
    }

    #[test]
    fn test_create_overrides_caller_envelope_fields() {
        let dir = TempDir::new().unwrap();
        let collection = collection(&dir);

        let created = collection
            .create(fields(json!({"id": "forged", "name": "x"})))
            .unwrap();

        assert_ne!(created.id(), "forged");
    }

    #[test]
    fn test_update_merges_and_refreshes_updated_at() {
        let dir = TempDir::new().unwrap();
        let collection = collection(&dir);

        let created = collection
            .create(fields(json!({"a": 0, "b": 2})))
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let updated = collection
            .update(created.id(), fields(json!({"a": 1})))
            .unwrap()
            .unwrap();

        assert_eq!(updated.get("a").unwrap(), 1);
        assert_eq!(updated.get("b").unwrap(), 2);
        assert_eq!(updated.created_at(), created.created_at());
        assert!(updated.updated_at() > created.updated_at());
    }

    #[test]
    fn test_update_ignores_immutable_fields_in_patch() {
        let dir = TempDir::new().unwrap();
        let collection = collection(&dir);

        let created = collection.create(fields(json!({"a": 0}))).unwrap();
        let updated = collection
            .update(
                created.id(),
                fields(json!({"id": "forged", "createdAt": "1970-01-01T00:00:00.000Z"})),
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.created_at(), created.created_at());
    }

    #[test]
    fn test_update_missing_id_returns_none_without_writing() {
        let dir = TempDir::new().unwrap();
        let collection = collection(&dir);
        collection.create(fields(json!({"a": 0}))).unwrap();

        let before = fs::read_to_string(collection.path()).unwrap();
        let result = collection
            .update("no-such-id", fields(json!({"a": 1})))
            .unwrap();
        let after = fs::read_to_string(collection.path()).unwrap();

        assert!(result.is_none());
        assert_eq!(before, after);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let collection = collection(&dir);

        let created = collection.create(fields(json!({"a": 0}))).unwrap();
        collection.delete(created.id()).unwrap();
        collection.delete(created.id()).unwrap();

        assert!(collection.find_by_id(created.id()).unwrap().is_none());
    }

    #[test]
    fn test_find_one_matches_all_pairs_exactly() {
        let dir = TempDir::new().unwrap();
        let collection = collection(&dir);

        collection
            .create(fields(json!({"email": "a@example.com", "role": "user"})))
            .unwrap();
        collection
            .create(fields(json!({"email": "a@example.com", "role": "admin"})))
            .unwrap();

        let found = collection
            .find_one(&fields(json!({"email": "a@example.com", "role": "admin"})))
            .unwrap()
            .unwrap();
        assert_eq!(found.get("role").unwrap(), "admin");

        let missing = collection
            .find_one(&fields(json!({"email": "b@example.com"})))
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_rapid_creates_yield_distinct_ids() {
        let dir = TempDir::new().unwrap();
        let collection = collection(&dir);

        let mut ids = HashSet::new();
        for i in 0..1000 {
            let record = collection.create(fields(json!({"n": i}))).unwrap();
            ids.insert(record.id().to_string());
        }

        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let collection = FileCollection::new(dir.path().join("absent.json"));

        assert!(collection.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_a_distinguishable_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "{not json").unwrap();

        let collection = FileCollection::new(&path);
        let result = collection.read_all();

        assert!(matches!(result, Err(Error::Corrupt(_))));
    }

    #[test]
    fn test_file_is_a_pretty_printed_array() {
        let dir = TempDir::new().unwrap();
        let collection = collection(&dir);
        collection.create(fields(json!({"name": "x"}))).unwrap();

        let content = fs::read_to_string(collection.path()).unwrap();
        assert!(content.starts_with("[\n  {"));
        assert!(content.contains("\"createdAt\""));
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let dir = TempDir::new().unwrap();
        let collection = collection(&dir);

        for name in ["first", "second", "third"] {
            collection.create(fields(json!({"name": name}))).unwrap();
        }

        let names: Vec<String> = collection
            .read_all()
            .unwrap()
            .iter()
            .map(|r| r.get("name").unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }
}
