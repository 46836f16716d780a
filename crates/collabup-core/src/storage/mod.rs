//! Storage Module
//!
//! SQLite-backed document store for candidate records:
//! - One collection per record type, documents kept as JSON objects
//! - Stable ids and insertion-order reads
//! - Versioned schema migrations applied on open

mod migrations;
mod sqlite;

pub use migrations::MIGRATIONS;
pub use sqlite::{
    CollectionHealth, CollectionInfo, CollectionStatus, Result, Storage, StorageError,
};
