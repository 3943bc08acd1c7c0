//! JSON output formatting for items.

use pantry_core::InventoryItem;

/// Convert an item to JSON for output.
pub fn item_json(item: &InventoryItem) -> serde_json::Value {
    serde_json::json!({
        "name": item.name,
        "displayName": item.display_name(),
        "quantity": item.quantity,
        "imageUrl": item.image_url,
    })
}

/// Convert multiple items to a JSON array for output.
pub fn items_json(items: &[&InventoryItem]) -> Vec<serde_json::Value> {
    items.iter().map(|item| item_json(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::store::ItemDocument;

    #[test]
    fn test_item_json_has_null_image_when_absent() {
        let item = InventoryItem::from_document("apple", ItemDocument::new(2));
        let value = item_json(&item);
        assert_eq!(value["name"], "apple");
        assert_eq!(value["displayName"], "Apple");
        assert_eq!(value["quantity"], 2);
        assert!(value["imageUrl"].is_null());
    }
}
