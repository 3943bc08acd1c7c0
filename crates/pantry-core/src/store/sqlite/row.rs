//! Document row type for inventory queries.

use crate::error::{PantryError, Result};
use crate::store::types::ItemDocument;

/// Raw row data from the inventory table, before parsing into domain types.
#[derive(Debug)]
pub struct DocumentRow {
    pub name: String,
    pub quantity: i64,
    pub image_url: Option<String>,
}

impl DocumentRow {
    pub fn from_sql(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(0)?,
            quantity: row.get(1)?,
            image_url: row.get(2)?,
        })
    }

    /// Split the row into its key and stored fields.
    pub fn into_parts(self) -> Result<(String, ItemDocument)> {
        let quantity = u64::try_from(self.quantity)
            .ok()
            .filter(|quantity| *quantity >= 1)
            .ok_or_else(|| {
                PantryError::Corrupt(format!(
                    "Invalid quantity {} for item {}",
                    self.quantity, self.name
                ))
            })?;

        Ok((
            self.name,
            ItemDocument {
                quantity,
                image_url: self.image_url,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_parts_rejects_non_positive_quantity() {
        for quantity in [0, -3] {
            let row = DocumentRow {
                name: "Apple".to_string(),
                quantity,
                image_url: None,
            };
            assert!(matches!(row.into_parts(), Err(PantryError::Corrupt(_))));
        }
    }

    #[test]
    fn test_into_parts_keeps_image_url() {
        let row = DocumentRow {
            name: "Apple".to_string(),
            quantity: 4,
            image_url: Some("https://cdn.example/images/1.png".to_string()),
        };
        let (name, document) = row.into_parts().unwrap();
        assert_eq!(name, "Apple");
        assert_eq!(
            document,
            ItemDocument::new(4).with_image_url("https://cdn.example/images/1.png")
        );
    }
}
