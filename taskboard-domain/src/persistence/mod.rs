//! Adapters implementing [`crate::ports::KeyValueStore`].

pub mod filesystem_store;
pub mod memory_store;

pub use filesystem_store::FileKeyValueStore;
pub use memory_store::InMemoryKeyValueStore;
