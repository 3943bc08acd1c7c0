//! Explicit application state for an inventory view.
//!
//! A front end holds one `InventoryState`: the last fetched item list, the
//! current search text and a captured photo waiting to be attached. Every
//! operation takes the state by reference and returns the next state, so a
//! failed operation leaves the caller's state (pending photo included)
//! exactly as it was.

use crate::blob::BlobStore;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::photo::PhotoPayload;
use crate::search::filter_items;
use crate::store::{DecrementOutcome, DocumentStore, InventoryItem};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryState {
    items: Vec<InventoryItem>,
    search_query: String,
    pending_photo: Option<PhotoPayload>,
}

impl InventoryState {
    /// Fetch the full list into a fresh state.
    pub fn load<S: DocumentStore, B: BlobStore>(ledger: &Ledger<S, B>) -> Result<Self> {
        Ok(Self {
            items: ledger.list()?,
            ..Self::default()
        })
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn pending_photo(&self) -> Option<&PhotoPayload> {
        self.pending_photo.as_ref()
    }

    /// Items matching the current search text. Never refetches.
    pub fn visible(&self) -> Vec<&InventoryItem> {
        filter_items(&self.items, &self.search_query)
    }

    pub fn with_search(&self, query: impl Into<String>) -> Self {
        Self {
            search_query: query.into(),
            ..self.clone()
        }
    }

    /// Hold a captured photo for the next add.
    pub fn with_photo(&self, photo: PhotoPayload) -> Self {
        Self {
            pending_photo: Some(photo),
            ..self.clone()
        }
    }

    pub fn without_photo(&self) -> Self {
        Self {
            pending_photo: None,
            ..self.clone()
        }
    }

    /// Refetch the item list, keeping search text and pending photo.
    pub fn refresh<S: DocumentStore, B: BlobStore>(&self, ledger: &Ledger<S, B>) -> Result<Self> {
        Ok(Self {
            items: ledger.list()?,
            ..self.clone()
        })
    }

    /// Add one unit of `name`, attaching and consuming the pending photo,
    /// then refresh.
    pub fn add_item<S: DocumentStore, B: BlobStore>(
        &self,
        ledger: &Ledger<S, B>,
        name: &str,
    ) -> Result<Self> {
        ledger.increment(name, self.pending_photo.as_ref())?;
        Ok(Self {
            items: ledger.list()?,
            search_query: self.search_query.clone(),
            pending_photo: None,
        })
    }

    /// Remove one unit of `name`, then refresh. Returns what happened to
    /// the item alongside the new state.
    pub fn remove_item<S: DocumentStore, B: BlobStore>(
        &self,
        ledger: &Ledger<S, B>,
        name: &str,
    ) -> Result<(Self, DecrementOutcome)> {
        let outcome = ledger.decrement(name)?;
        Ok((self.refresh(ledger)?, outcome))
    }
}
