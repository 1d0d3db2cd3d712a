//! Infrastructure layer with adapters for the durable slot and configuration.

/// Application configuration.
pub mod config;
/// Dashboard slot adapters.
pub mod storage;

pub use config::{AppConfig, CliArgs, Command, LogLevel, StorageManager};
pub use storage::{JsonFileStorage, MemoryStorage};
