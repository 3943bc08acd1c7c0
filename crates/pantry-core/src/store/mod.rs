//! Document store abstractions and backends.

pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteStore;
pub use traits::DocumentStore;
pub use types::{DecrementOutcome, InventoryItem, ItemDocument, KeyPolicy};
