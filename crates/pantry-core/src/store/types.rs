//! Core data types for the inventory collection.

use serde::{Deserialize, Serialize};

use crate::error::{PantryError, Result};

/// Fields stored under one document key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDocument {
    /// Number of units on hand (always >= 1 for a stored document)
    pub quantity: u64,

    /// Download URL of the last attached photo
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ItemDocument {
    pub fn new(quantity: u64) -> Self {
        Self {
            quantity,
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// A document projected for display: the key becomes the item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub quantity: u64,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl InventoryItem {
    pub fn from_document(name: impl Into<String>, document: ItemDocument) -> Self {
        Self {
            name: name.into(),
            quantity: document.quantity,
            image_url: document.image_url,
        }
    }

    /// Name with its first character upper-cased. Presentation only.
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Result of an atomic decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// No document existed; nothing was written
    Absent,
    /// The quantity dropped to the contained value
    Decremented(u64),
    /// The last unit was removed and the document deleted
    Removed,
}

/// How item names are turned into document keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPolicy {
    /// Store the name exactly as given; "Apple" and "apple" are distinct
    #[default]
    Verbatim,
    /// Fold names to lower case so differently-cased names share a document
    Lowercase,
}

impl KeyPolicy {
    const MAX_KEY_BYTES: usize = 1500;

    /// Validate `name` and return the document key it maps to.
    pub fn key_for(&self, name: &str) -> Result<String> {
        if name.trim().is_empty() {
            return Err(PantryError::InvalidInput(
                "Item name cannot be empty".to_string(),
            ));
        }
        if name.contains('/') {
            return Err(PantryError::InvalidInput(format!(
                "Item name cannot contain '/': {}",
                name
            )));
        }
        if name == "." || name == ".." {
            return Err(PantryError::InvalidInput(format!(
                "Item name is reserved: {}",
                name
            )));
        }

        let key = match self {
            Self::Verbatim => name.to_string(),
            Self::Lowercase => name.to_lowercase(),
        };
        if key.len() > Self::MAX_KEY_BYTES {
            return Err(PantryError::InvalidInput(format!(
                "Item name too long (max {} bytes)",
                Self::MAX_KEY_BYTES
            )));
        }
        Ok(key)
    }
}

impl std::str::FromStr for KeyPolicy {
    type Err = PantryError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "verbatim" => Ok(Self::Verbatim),
            "lowercase" => Ok(Self::Lowercase),
            other => Err(PantryError::InvalidInput(format!(
                "Unknown key policy: {} (use verbatim or lowercase)",
                other
            ))),
        }
    }
}
