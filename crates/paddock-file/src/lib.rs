//! paddock-file - File-backed record store and repositories.

mod models;
mod store;
mod users;

pub use models::ModelRepository;
pub use store::FileCollection;
pub use users::{ADMIN_EMAIL, UserRepository};
