//! paddock-core - Core record types and errors for the paddock store.

pub mod error;
pub mod model;
pub mod record;
pub mod user;

pub use error::Error;
pub use model::{ModelMetadata, ModelRecord, ModelStatus, NewModel};
pub use record::Record;
pub use user::{NewUser, Preferences, PreferencesPatch, ProfileUpdate, Role, User};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
