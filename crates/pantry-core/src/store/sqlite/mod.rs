//! SQLite document store backend.
//!
//! The `inventory` collection is a single table keyed by item name. Every
//! mutation runs inside an immediate write transaction, so per-key updates
//! are atomic both within the process (the connection mutex) and across
//! processes sharing the same file (SQLite's write lock).

mod row;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, TransactionBehavior};
use tracing::debug;

use crate::error::{PantryError, Result};
use crate::store::traits::DocumentStore;
use crate::store::types::{DecrementOutcome, ItemDocument};

use row::DocumentRow;

/// SQLite-backed inventory collection.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    const FORMAT_VERSION: &'static str = "1";
    const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a new store file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::InvalidInput` if the file already exists and
    /// `PantryError::StoreUnavailable` if it cannot be written.
    pub fn create(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(PantryError::InvalidInput(format!(
                "Store file already exists: {}",
                path.display()
            )));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                PantryError::StoreUnavailable(format!(
                    "Failed to create store directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let conn = Connection::open(path)?;
        if let Err(err) = Self::initialize(&conn) {
            drop(conn);
            let _ = fs::remove_file(path);
            return Err(err);
        }
        debug!(path = %path.display(), "created store");
        Ok(())
    }

    /// Open an existing store file.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::NotFound` if the file does not exist and
    /// `PantryError::Corrupt` if it was not created by this version.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PantryError::NotFound(format!(
                "Store file {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(Self::BUSY_TIMEOUT)?;
        Self::check_format(&conn)?;

        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
        })
    }

    /// Open a private, empty store that lives only as long as the value.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(&conn)?;
        Ok(Self {
            path: None,
            conn: Mutex::new(conn),
        })
    }

    /// Path of the backing file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn initialize(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE inventory (
                name TEXT PRIMARY KEY,
                quantity INTEGER NOT NULL CHECK (quantity >= 1),
                image_url TEXT
            );
            "#,
        )?;

        let created_at = chrono::Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO meta (key, value) VALUES (?, ?)",
            ["format_version", Self::FORMAT_VERSION],
        )?;
        conn.execute(
            "INSERT INTO meta (key, value) VALUES (?, ?)",
            ["created_at", created_at.as_str()],
        )?;
        Ok(())
    }

    fn check_format(conn: &Connection) -> Result<()> {
        let version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| PantryError::Corrupt(format!("Not a pantry store: {}", e)))?;

        match version.as_deref() {
            Some(Self::FORMAT_VERSION) => Ok(()),
            Some(other) => Err(PantryError::Corrupt(format!(
                "Unsupported store format version: {}",
                other
            ))),
            None => Err(PantryError::Corrupt(
                "Store metadata is missing a format version".to_string(),
            )),
        }
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| PantryError::StoreUnavailable("SQLite connection poisoned".to_string()))
    }

    fn read_row(conn: &Connection, key: &str) -> Result<Option<DocumentRow>> {
        let row = conn
            .query_row(
                "SELECT name, quantity, image_url FROM inventory WHERE name = ?",
                [key],
                DocumentRow::from_sql,
            )
            .optional()?;
        Ok(row)
    }

    fn to_sql_quantity(quantity: u64) -> Result<i64> {
        if quantity == 0 {
            return Err(PantryError::InvalidInput(
                "Quantity 0 cannot be stored; delete the document instead".to_string(),
            ));
        }
        i64::try_from(quantity)
            .map_err(|_| PantryError::InvalidInput(format!("Quantity too large: {}", quantity)))
    }
}

impl DocumentStore for SqliteStore {
    fn get_document(&self, key: &str) -> Result<Option<ItemDocument>> {
        let conn = self.lock_conn()?;
        Self::read_row(&conn, key)?
            .map(|row| row.into_parts().map(|(_, document)| document))
            .transpose()
    }

    fn set_document(&self, key: &str, document: &ItemDocument) -> Result<()> {
        let quantity = Self::to_sql_quantity(document.quantity)?;
        let conn = self.lock_conn()?;
        conn.execute(
            r#"
            INSERT INTO inventory (name, quantity, image_url)
            VALUES (?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET
                quantity = excluded.quantity,
                image_url = excluded.image_url
            "#,
            (key, quantity, document.image_url.as_deref()),
        )?;
        debug!(key, quantity, "set document");
        Ok(())
    }

    fn delete_document(&self, key: &str) -> Result<bool> {
        let conn = self.lock_conn()?;
        let removed = conn.execute("DELETE FROM inventory WHERE name = ?", [key])?;
        debug!(key, removed, "delete document");
        Ok(removed > 0)
    }

    fn list_documents(&self) -> Result<Vec<(String, ItemDocument)>> {
        let conn = self.lock_conn()?;
        let mut stmt =
            conn.prepare("SELECT name, quantity, image_url FROM inventory ORDER BY name")?;
        let rows = stmt.query_map([], DocumentRow::from_sql)?;

        let mut documents = Vec::new();
        for row in rows {
            documents.push(row?.into_parts()?);
        }
        debug!(count = documents.len(), "listed documents");
        Ok(documents)
    }

    fn increment_document(&self, key: &str, image_url: Option<&str>) -> Result<ItemDocument> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            r#"
            INSERT INTO inventory (name, quantity, image_url)
            VALUES (?, 1, ?)
            ON CONFLICT(name) DO UPDATE SET
                quantity = inventory.quantity + 1,
                image_url = COALESCE(excluded.image_url, inventory.image_url)
            "#,
            (key, image_url),
        )?;
        let row = Self::read_row(&tx, key)?.ok_or_else(|| {
            PantryError::StoreUnavailable(format!("Document {} vanished during increment", key))
        })?;
        tx.commit()?;

        let (_, document) = row.into_parts()?;
        debug!(key, quantity = document.quantity, "incremented document");
        Ok(document)
    }

    fn decrement_document(&self, key: &str) -> Result<DecrementOutcome> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current: Option<i64> = tx
            .query_row(
                "SELECT quantity FROM inventory WHERE name = ?",
                [key],
                |row| row.get(0),
            )
            .optional()?;

        let outcome = match current {
            None => DecrementOutcome::Absent,
            Some(quantity) if quantity <= 1 => {
                tx.execute("DELETE FROM inventory WHERE name = ?", [key])?;
                DecrementOutcome::Removed
            }
            Some(quantity) => {
                tx.execute(
                    "UPDATE inventory SET quantity = quantity - 1 WHERE name = ?",
                    [key],
                )?;
                // quantity > 1 here, so the subtraction stays positive
                DecrementOutcome::Decremented((quantity - 1) as u64)
            }
        };
        tx.commit()?;

        debug!(key, ?outcome, "decremented document");
        Ok(outcome)
    }
}
