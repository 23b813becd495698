//! Shared command context: data directory resolution and repository wiring.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use paddock_file::{FileCollection, ModelRepository, UserRepository};
use paddock_ollama::{DEFAULT_RUNTIME_URL, OllamaClient};

/// Resolve the data directory: flag, then environment, then platform dirs.
pub fn data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    let dir = if let Some(dir) = flag {
        dir
    } else if let Ok(dir) = std::env::var("PADDOCK_DATA") {
        PathBuf::from(dir)
    } else {
        ProjectDirs::from("dev", "paddock", "paddock")
            .context("Could not determine a data directory; pass --data-dir")?
            .data_dir()
            .to_path_buf()
    };

    debug!(path = %dir.display(), "Resolved data directory");
    Ok(dir)
}

/// Open the model repository, creating its collection file if needed.
pub fn open_models(data_dir: &Path) -> Result<ModelRepository> {
    let repository = ModelRepository::new(FileCollection::new(data_dir.join("models.json")));
    repository
        .initialize()
        .context("Failed to initialize the models collection")?;
    Ok(repository)
}

/// Open the user repository, creating its collection file if needed.
pub fn open_users(data_dir: &Path) -> Result<UserRepository> {
    let repository = UserRepository::new(FileCollection::new(data_dir.join("users.json")));
    repository
        .initialize()
        .context("Failed to initialize the users collection")?;
    Ok(repository)
}

/// Build a runtime client: flag, then environment, then the default URL.
pub fn runtime(flag: Option<String>) -> OllamaClient {
    let url = flag
        .or_else(|| std::env::var("PADDOCK_RUNTIME_URL").ok())
        .unwrap_or_else(|| DEFAULT_RUNTIME_URL.to_string());
    OllamaClient::new(url)
}
