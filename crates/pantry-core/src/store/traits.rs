//! Document store trait definition.
//!
//! The `DocumentStore` trait is the boundary between ledger operations and
//! whatever holds the `inventory` collection. Keys are item names exactly as
//! the key policy produced them.

use super::types::{DecrementOutcome, ItemDocument};
use crate::error::Result;

/// Keyed-document collection holding inventory documents.
///
/// All implementations must ensure:
/// - At most one document per key
/// - No document is ever stored with quantity 0
/// - `increment_document` and `decrement_document` are atomic per key, so
///   concurrent callers never lose an update
pub trait DocumentStore: Send + Sync {
    /// Get a document by key.
    ///
    /// Returns `Ok(None)` if no document exists.
    fn get_document(&self, key: &str) -> Result<Option<ItemDocument>>;

    /// Overwrite the document at `key` with exactly the given fields.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::InvalidInput` if `document.quantity` is 0.
    fn set_document(&self, key: &str, document: &ItemDocument) -> Result<()>;

    /// Delete a document. Returns whether a document was removed.
    fn delete_document(&self, key: &str) -> Result<bool>;

    /// Scan the whole collection, ordered by key.
    fn list_documents(&self) -> Result<Vec<(String, ItemDocument)>>;

    /// Add one unit to `key`, creating the document at quantity 1 if absent.
    ///
    /// When `image_url` is `Some` it replaces the stored URL; when `None`
    /// the stored URL is left as it was.
    ///
    /// Returns the document as written.
    fn increment_document(&self, key: &str, image_url: Option<&str>) -> Result<ItemDocument>;

    /// Remove one unit from `key`, deleting the document when the last unit
    /// goes. Absent keys are left untouched.
    fn decrement_document(&self, key: &str) -> Result<DecrementOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn_store(_store: &dyn DocumentStore) {}
    }
}
