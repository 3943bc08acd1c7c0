//! Captured photo payloads.
//!
//! A capture arrives as a data URL (`data:image/png;base64,...`, what a
//! browser canvas produces), as bare base64 text, or as raw bytes read from
//! a file. Whatever the source, the payload is decoded once here and handed
//! to the blob store as bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{PantryError, Result};

const DEFAULT_MEDIA_TYPE: &str = "image/png";

/// Decoded image bytes plus their declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPayload {
    media_type: String,
    bytes: Vec<u8>,
}

impl PhotoPayload {
    /// Wrap raw image bytes, e.g. the contents of a PNG file.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(PantryError::InvalidInput(
                "Photo payload is empty".to_string(),
            ));
        }
        Ok(Self {
            media_type: DEFAULT_MEDIA_TYPE.to_string(),
            bytes,
        })
    }

    /// Decode a `data:<media-type>;base64,<data>` URL.
    pub fn from_data_url(value: &str) -> Result<Self> {
        let rest = value.trim().strip_prefix("data:").ok_or_else(|| {
            PantryError::InvalidInput("Photo data URL must start with \"data:\"".to_string())
        })?;
        let (header, data) = rest.split_once(',').ok_or_else(|| {
            PantryError::InvalidInput("Photo data URL is missing its payload".to_string())
        })?;
        let media_type = header.strip_suffix(";base64").ok_or_else(|| {
            PantryError::InvalidInput("Photo data URL must be base64 encoded".to_string())
        })?;
        if !media_type.starts_with("image/") {
            return Err(PantryError::InvalidInput(format!(
                "Photo must be an image, got {}",
                if media_type.is_empty() { "no media type" } else { media_type }
            )));
        }

        let mut payload = Self::from_bytes(decode(data)?)?;
        payload.media_type = media_type.to_string();
        Ok(payload)
    }

    /// Decode either a data URL or bare base64 text.
    pub fn parse(value: &str) -> Result<Self> {
        if value.trim_start().starts_with("data:") {
            Self::from_data_url(value)
        } else {
            Self::from_bytes(decode(value)?)
        }
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn decode(data: &str) -> Result<Vec<u8>> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| PantryError::InvalidInput(format!("Photo is not valid base64: {}", e)))
}
