//! CNAPP Dashboard - a terminal dashboard of categorized widget cards.
//!
//! The crate keeps a categories → widgets tree in a durable JSON slot,
//! supports adding, editing, removing and searching widgets, and ships a
//! TUI plus one-shot subcommands on top of the same store.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the store, use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing storage adapters and configuration.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "cnapp-dashboard";
