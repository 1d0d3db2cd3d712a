//! Dashboard slot adapters.

mod json_file_storage;
mod memory_storage;

pub use json_file_storage::JsonFileStorage;
pub use memory_storage::MemoryStorage;
