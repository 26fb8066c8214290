//! String key-value persistence underneath the record store.
//!
//! Values are opaque strings; the record store decides what goes in them.
//! Two backends: [`SqliteStorage`] for the on-disk database and
//! [`MemoryStorage`] for tests and throwaway sessions.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{Connection, DatabaseName, OptionalExtension};

use crate::error::Result;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

pub trait KeyValueStore {
    /// `None` when the key was never written (or was removed).
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    /// Overwrites any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    /// Removes each key in turn. Not atomic: a failure part way leaves the
    /// earlier keys removed.
    fn multi_remove(&mut self, keys: &[&str]) -> Result<()>;
}

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!(path = %db_path.display(), "opened storage");
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Online copy of the whole database to `dest`, safe while this
    /// connection is open.
    pub fn backup_to(&self, dest: &Path) -> Result<()> {
        self.conn.backup(DatabaseName::Main, dest, None)?;
        tracing::info!(path = %dest.display(), "backup written");
        Ok(())
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}

impl KeyValueStore for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    fn multi_remove(&mut self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.conn.execute("DELETE FROM kv WHERE key = ?1", [*key])?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn multi_remove(&mut self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.items.remove(*key);
        }
        Ok(())
    }
}
