//! Blob storage for photo payloads.
//!
//! Photos are written under timestamp-derived keys and the store hands back
//! a URL the item document can reference.

mod fs_store;

use std::fmt;

use chrono::Utc;

use crate::error::Result;

pub use fs_store::FsBlobStore;

/// Object key inside the blob store, e.g. `images/1718000000000.png`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobKey(String);

impl BlobKey {
    /// Key for an image captured at the given Unix time in milliseconds.
    pub fn image_at(millis: i64) -> Self {
        Self(format!("images/{}.png", millis))
    }

    /// Key for an image captured now.
    ///
    /// Two captures in the same millisecond share a key; the later write
    /// replaces the earlier blob.
    pub fn image_now() -> Self {
        Self::image_at(Utc::now().timestamp_millis())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Binary object storage that resolves written blobs to fetchable URLs.
pub trait BlobStore: Send + Sync {
    /// Write `bytes` under `key`, replacing any existing blob, and return
    /// the URL it can be fetched from.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::UploadFailed` if the blob cannot be written.
    fn put_blob(&self, key: &BlobKey, bytes: &[u8]) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_key_format() {
        assert_eq!(
            BlobKey::image_at(1718000000123).as_str(),
            "images/1718000000123.png"
        );
    }

    #[test]
    fn test_image_now_uses_current_millis() {
        let before = Utc::now().timestamp_millis();
        let key = BlobKey::image_now();
        let after = Utc::now().timestamp_millis();

        let millis: i64 = key
            .as_str()
            .strip_prefix("images/")
            .and_then(|rest| rest.strip_suffix(".png"))
            .unwrap()
            .parse()
            .unwrap();
        assert!(millis >= before && millis <= after);
    }
}
