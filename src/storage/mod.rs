pub mod engine;
pub mod file;
pub mod memory;
pub mod persistence;

pub use engine::KeyValueStore;
pub use file::{FileStore, validate_key};
pub use memory::InMemoryStore;
pub use persistence::{DEFAULT_STORAGE_KEY, ItemPersistence};
