//! Model catalog repository.
//!
//! Domain wrapper over the `models` collection: fills metadata defaults,
//! enforces the status enum, and adds name-keyed lookup and substring
//! search on top of the raw store.

use serde_json::{Map, Value};
use tracing::debug;

use paddock_core::error::ValidationError;
use paddock_core::{ModelMetadata, ModelRecord, ModelStatus, NewModel, Result};

use crate::store::{FileCollection, to_json};

/// Repository for the model catalog.
#[derive(Debug, Clone)]
pub struct ModelRepository {
    collection: FileCollection,
}

impl ModelRepository {
    /// Wrap an owned collection handle.
    pub fn new(collection: FileCollection) -> Self {
        Self { collection }
    }

    /// Ensure the backing file exists.
    pub fn initialize(&self) -> Result<()> {
        self.collection.initialize()
    }

    /// Create a model record.
    ///
    /// Metadata fields the caller omits fall back to the catalog defaults,
    /// and the status is always `available` regardless of caller input.
    pub fn create(&self, model: NewModel) -> Result<ModelRecord> {
        if model.name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "name" }.into());
        }

        let defaults = ModelMetadata::default();
        let metadata = ModelMetadata {
            architecture: model.architecture.unwrap_or(defaults.architecture),
            format: model.format.unwrap_or(defaults.format),
            family: model.family.unwrap_or(defaults.family),
            parameters: model.parameters.unwrap_or(defaults.parameters),
            quantization: model.quantization.unwrap_or(defaults.quantization),
        };

        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(model.name));
        fields.insert(
            "description".to_string(),
            Value::String(model.description.unwrap_or_default()),
        );
        fields.insert(
            "version".to_string(),
            Value::String(model.version.unwrap_or_default()),
        );
        fields.insert("size".to_string(), model.size.unwrap_or(0).into());
        fields.insert(
            "status".to_string(),
            Value::String(ModelStatus::Available.as_str().to_string()),
        );
        fields.insert("metadata".to_string(), to_json(&metadata)?);

        let record = self.collection.create(fields)?;
        debug!(name = record.get("name").and_then(Value::as_str), "Cataloged model");
        record.to_typed()
    }

    /// All models in collection order.
    pub fn find_all(&self) -> Result<Vec<ModelRecord>> {
        self.collection
            .read_all()?
            .iter()
            .map(|r| r.to_typed())
            .collect()
    }

    /// Model with the given id, if present.
    pub fn find_by_id(&self, id: &str) -> Result<Option<ModelRecord>> {
        self.collection
            .find_by_id(id)?
            .as_ref()
            .map(|r| r.to_typed())
            .transpose()
    }

    /// First model with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Result<Option<ModelRecord>> {
        let mut query = Map::new();
        query.insert("name".to_string(), Value::String(name.to_string()));
        self.collection
            .find_one(&query)?
            .as_ref()
            .map(|r| r.to_typed())
            .transpose()
    }

    /// Delete the model with this name. A missing name is a no-op.
    pub fn delete_by_name(&self, name: &str) -> Result<()> {
        if let Some(model) = self.find_by_name(name)? {
            self.collection.delete(&model.id)?;
        }
        Ok(())
    }

    /// Case-insensitive substring search over name, description, and model
    /// family. Results come back in collection order.
    pub fn search(&self, query: &str) -> Result<Vec<ModelRecord>> {
        let needle = query.to_lowercase();
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|model| {
                model.name.to_lowercase().contains(&needle)
                    || model.description.to_lowercase().contains(&needle)
                    || model.metadata.family.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Shallow-merge `patch` onto a model record.
    ///
    /// A `status` entry in the patch must name one of the allowed states;
    /// the patch is rejected before the store is touched otherwise.
    pub fn update(&self, id: &str, patch: Map<String, Value>) -> Result<Option<ModelRecord>> {
        if let Some(status) = patch.get("status") {
            let value = status.as_str().ok_or_else(|| ValidationError::Status {
                value: status.to_string(),
            })?;
            value.parse::<ModelStatus>()?;
        }

        self.collection
            .update(id, patch)?
            .as_ref()
            .map(|r| r.to_typed())
            .transpose()
    }

    /// Move a model to a new lifecycle state.
    pub fn set_status(&self, id: &str, status: ModelStatus) -> Result<Option<ModelRecord>> {
        let mut patch = Map::new();
        patch.insert(
            "status".to_string(),
            Value::String(status.as_str().to_string()),
        );
        self.collection
            .update(id, patch)?
            .as_ref()
            .map(|r| r.to_typed())
            .transpose()
    }
}
