//! # Pantry Core
//!
//! Core library for Pantry - a small inventory tracker with photo capture.
//!
//! This crate provides the item-count ledger, the document and blob store
//! abstractions it runs on, and the state container a front end drives,
//! independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **store**: Document store trait and the SQLite backend
//! - **blob**: Blob store trait and the filesystem backend
//! - **photo**: Captured photo payload decoding
//! - **ledger**: Increment, decrement and list over the store
//! - **search**: Case-insensitive name filtering
//! - **state**: Explicit view state passed through every operation

pub mod blob;
pub mod error;
pub mod fs;
pub mod ledger;
pub mod photo;
pub mod search;
pub mod state;
pub mod store;

pub use blob::{BlobKey, BlobStore, FsBlobStore};
pub use error::{PantryError, Result};
pub use ledger::Ledger;
pub use photo::PhotoPayload;
pub use state::InventoryState;
pub use store::{DecrementOutcome, DocumentStore, InventoryItem, KeyPolicy, SqliteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
