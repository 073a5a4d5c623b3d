//! SQLite-backed key-value store

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use super::migrations;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Durable [`KeyValueStore`] over a single `SQLite` file.
///
/// Any `SQLite` failure surfaces as `StorageUnavailable`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a store at the given path, creating it (and its parent
    /// directories) if it doesn't exist
    ///
    /// Runs migrations automatically.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.configure();
        store.migrate()?;
        tracing::debug!("Opened store at {}", path.display());
        Ok(store)
    }

    /// Open an in-memory store (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn configure(&self) {
        // Best effort; not every filesystem supports WAL.
        if let Err(error) =
            self.conn
                .pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                    row.get::<_, String>(0)
                })
        {
            tracing::debug!("Could not enable WAL mode: {}", error);
        }
    }

    fn migrate(&self) -> Result<()> {
        migrations::run(&self.conn)
    }

    #[cfg(test)]
    pub(crate) const fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}
