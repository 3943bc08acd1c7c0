//! Client-side search over a fetched inventory list.

use crate::store::types::InventoryItem;

/// Case-insensitive substring match of `query` against an item name.
///
/// The empty query matches every name.
pub fn matches_query(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}

/// Items whose names contain `query`, in their original order.
pub fn filter_items<'a>(items: &'a [InventoryItem], query: &str) -> Vec<&'a InventoryItem> {
    items
        .iter()
        .filter(|item| matches_query(&item.name, query))
        .collect()
}
