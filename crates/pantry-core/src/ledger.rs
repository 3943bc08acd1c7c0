//! Ledger operations: the quantity transitions on the inventory collection.

use tracing::{debug, error, info};

use crate::blob::{BlobKey, BlobStore};
use crate::error::{PantryError, Result};
use crate::photo::PhotoPayload;
use crate::store::{DecrementOutcome, DocumentStore, InventoryItem, KeyPolicy};

/// Increment, decrement and list over a document store, with photos
/// persisted to a blob store.
pub struct Ledger<S, B> {
    store: S,
    blobs: B,
    key_policy: KeyPolicy,
}

impl<S: DocumentStore, B: BlobStore> Ledger<S, B> {
    pub fn new(store: S, blobs: B) -> Self {
        Self {
            store,
            blobs,
            key_policy: KeyPolicy::default(),
        }
    }

    pub fn with_key_policy(mut self, key_policy: KeyPolicy) -> Self {
        self.key_policy = key_policy;
        self
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    /// Add one unit of `name`, creating the item at quantity 1 if needed.
    ///
    /// A photo is uploaded before the store is touched; if the upload fails
    /// nothing is written. With a photo the stored image URL is replaced,
    /// without one it is kept.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the name is rejected by the key policy
    /// - `UploadFailed` if the photo cannot be stored
    /// - `StoreUnavailable` if the document store fails
    pub fn increment(&self, name: &str, photo: Option<&PhotoPayload>) -> Result<InventoryItem> {
        let key = self.key_policy.key_for(name)?;

        let image_url = match photo {
            Some(photo) => Some(self.upload(photo)?),
            None => None,
        };

        let document = self.store.increment_document(&key, image_url.as_deref())?;
        if document.quantity == 1 {
            info!(item = %key, "created item");
        }
        Ok(InventoryItem::from_document(key, document))
    }

    /// Remove one unit of `name`. The item is deleted when its last unit
    /// goes; an absent item is left alone.
    pub fn decrement(&self, name: &str) -> Result<DecrementOutcome> {
        let key = self.key_policy.key_for(name)?;
        let outcome = self.store.decrement_document(&key)?;
        if outcome == DecrementOutcome::Removed {
            info!(item = %key, "removed item");
        }
        Ok(outcome)
    }

    /// Every item in the collection, ordered by name.
    pub fn list(&self) -> Result<Vec<InventoryItem>> {
        let documents = self.store.list_documents()?;
        Ok(documents
            .into_iter()
            .map(|(name, document)| InventoryItem::from_document(name, document))
            .collect())
    }

    /// One item by name.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::NotFound` if no such item is stocked.
    pub fn get(&self, name: &str) -> Result<InventoryItem> {
        let key = self.key_policy.key_for(name)?;
        match self.store.get_document(&key)? {
            Some(document) => Ok(InventoryItem::from_document(key, document)),
            None => Err(PantryError::NotFound(format!("Item \"{}\"", name))),
        }
    }

    fn upload(&self, photo: &PhotoPayload) -> Result<String> {
        let key = BlobKey::image_now();
        debug!(
            %key,
            media_type = photo.media_type(),
            bytes = photo.bytes().len(),
            "uploading photo"
        );
        self.blobs.put_blob(&key, photo.bytes()).map_err(|err| {
            error!(%key, error = %err, "error uploading image");
            match err {
                PantryError::UploadFailed(_) => err,
                other => PantryError::UploadFailed(other.to_string()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ItemDocument, SqliteStore};
    use std::sync::Mutex;

    /// Blob store double that records writes or fails on demand.
    #[derive(Default)]
    struct RecordingBlobs {
        fail: bool,
        writes: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl BlobStore for RecordingBlobs {
        fn put_blob(&self, key: &BlobKey, bytes: &[u8]) -> Result<String> {
            if self.fail {
                return Err(PantryError::UploadFailed("bucket offline".to_string()));
            }
            self.writes
                .lock()
                .unwrap()
                .push((key.to_string(), bytes.to_vec()));
            Ok(format!("https://blobs.test/{}", key))
        }
    }

    fn ledger() -> Ledger<SqliteStore, RecordingBlobs> {
        Ledger::new(SqliteStore::open_in_memory().unwrap(), RecordingBlobs::default())
    }

    fn photo() -> PhotoPayload {
        PhotoPayload::from_bytes(b"\x89PNG".to_vec()).unwrap()
    }

    #[test]
    fn test_first_increment_creates_single_item() {
        let ledger = ledger();

        let item = ledger.increment("Apple", None).unwrap();

        assert_eq!(item.quantity, 1);
        assert_eq!(
            ledger.list().unwrap(),
            vec![InventoryItem::from_document("Apple", ItemDocument::new(1))]
        );
    }

    #[test]
    fn test_k_increments_yield_quantity_k() {
        let ledger = ledger();
        for _ in 0..7 {
            ledger.increment("Rice", None).unwrap();
        }
        assert_eq!(ledger.get("Rice").unwrap().quantity, 7);
    }

    #[test]
    fn test_decrement_at_one_removes_item() {
        let ledger = ledger();
        ledger.increment("Apple", None).unwrap();
        ledger.increment("Banana", None).unwrap();

        assert_eq!(ledger.decrement("Apple").unwrap(), DecrementOutcome::Removed);

        let items = ledger.list().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Banana");
        assert!(items.iter().all(|item| item.quantity > 0));
    }

    #[test]
    fn test_decrement_absent_is_noop() {
        let ledger = ledger();
        ledger.increment("Apple", None).unwrap();
        let before = ledger.list().unwrap();

        assert_eq!(ledger.decrement("Kiwi").unwrap(), DecrementOutcome::Absent);
        assert_eq!(ledger.list().unwrap(), before);
    }

    #[test]
    fn test_increment_then_decrement_restores_ledger() {
        let ledger = ledger();
        ledger.increment("Banana", None).unwrap();
        let before = ledger.list().unwrap();

        ledger.increment("Apple", None).unwrap();
        ledger.decrement("Apple").unwrap();

        assert_eq!(ledger.list().unwrap(), before);
    }

    #[test]
    fn test_photo_is_uploaded_and_referenced() {
        let ledger = ledger();

        let item = ledger.increment("Apple", Some(&photo())).unwrap();

        let writes = ledger.blobs().writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        let (key, bytes) = &writes[0];
        assert!(key.starts_with("images/") && key.ends_with(".png"));
        assert_eq!(bytes.as_slice(), b"\x89PNG");
        assert_eq!(
            item.image_url,
            Some(format!("https://blobs.test/{}", key))
        );
    }

    #[test]
    fn test_image_url_survives_plain_add_and_remove() {
        let ledger = ledger();
        let with_photo = ledger.increment("Apple", Some(&photo())).unwrap();
        ledger.increment("Apple", None).unwrap();
        ledger.increment("Apple", None).unwrap();

        assert_eq!(
            ledger.decrement("Apple").unwrap(),
            DecrementOutcome::Decremented(2)
        );
        assert_eq!(ledger.get("Apple").unwrap().image_url, with_photo.image_url);
    }

    #[test]
    fn test_failed_upload_writes_nothing() {
        let ledger = Ledger::new(
            SqliteStore::open_in_memory().unwrap(),
            RecordingBlobs {
                fail: true,
                ..Default::default()
            },
        );

        let err = ledger.increment("Apple", Some(&photo())).unwrap_err();

        assert!(matches!(err, PantryError::UploadFailed(_)));
        assert!(ledger.list().unwrap().is_empty());
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let ledger = ledger();
        assert!(matches!(
            ledger.get("Apple"),
            Err(PantryError::NotFound(_))
        ));
    }

    #[test]
    fn test_lowercase_policy_merges_case_variants() {
        let ledger = ledger().with_key_policy(KeyPolicy::Lowercase);
        ledger.increment("Apple", None).unwrap();
        ledger.increment("APPLE", None).unwrap();

        let items = ledger.list().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "apple");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(ledger.get("aPpLe").unwrap().quantity, 2);
    }

    #[test]
    fn test_verbatim_policy_keeps_case_variants_apart() {
        let ledger = ledger();
        ledger.increment("Apple", None).unwrap();
        ledger.increment("apple", None).unwrap();
        assert_eq!(ledger.list().unwrap().len(), 2);
    }

    #[test]
    fn test_blank_name_is_rejected_before_any_write() {
        let ledger = ledger();
        assert!(matches!(
            ledger.increment("  ", Some(&photo())),
            Err(PantryError::InvalidInput(_))
        ));
        assert!(ledger.blobs().writes.lock().unwrap().is_empty());
    }
}
