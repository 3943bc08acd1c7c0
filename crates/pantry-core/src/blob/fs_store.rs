//! Directory-backed blob store.

use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use super::{BlobKey, BlobStore};
use crate::error::{PantryError, Result};
use crate::fs::write_atomic;

/// Blob store that writes each key as a file under a root directory.
///
/// When a public base URL is configured (for example a static file server
/// fronting the root), URLs are `<base_url>/<key>`; otherwise they are
/// `file://` URLs of the written files.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    base_url: Option<String>,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }

    fn url_for(&self, key: &BlobKey, path: &Path) -> Result<String> {
        if let Some(base_url) = &self.base_url {
            return Ok(format!("{}/{}", base_url, key));
        }
        let absolute = path.canonicalize().map_err(|e| {
            PantryError::UploadFailed(format!("Cannot resolve {}: {}", path.display(), e))
        })?;
        Url::from_file_path(&absolute)
            .map(String::from)
            .map_err(|()| {
                PantryError::UploadFailed(format!(
                    "Cannot express {} as a file URL",
                    absolute.display()
                ))
            })
    }
}

impl BlobStore for FsBlobStore {
    fn put_blob(&self, key: &BlobKey, bytes: &[u8]) -> Result<String> {
        let path = self.root.join(key.as_str());
        write_atomic(&path, bytes).map_err(|e| {
            PantryError::UploadFailed(format!("Failed to write {}: {}", path.display(), e))
        })?;

        let url = self.url_for(key, &path)?;
        debug!(%key, bytes = bytes.len(), %url, "stored blob");
        Ok(url)
    }
}
