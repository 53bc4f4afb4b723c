//! Key-value blob persistence
//!
//! The task collection lives as one JSON document under a fixed key. The
//! SQLite backend keeps every key in a single `kv_store` table.

use std::collections::HashMap;
use std::path::Path;
use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use crate::db::DbConnection;

/// Key of the persisted task collection
pub const TASKS_KEY: &str = "taskpad.tasks";

/// Key of the pending-undo slot
pub const UNDO_KEY: &str = "taskpad.undo";

/// Durable string storage addressed by key
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
    fn delete(&mut self, key: &str) -> Result<()>;
}

/// Blob store backed by a SQLite table
pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(DbConnection::connect(path)?))
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(DbConnection::connect_in_memory()?))
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .with_context(|| format!("Failed to read key: {}", key))
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, modified_ts) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, modified_ts = excluded.modified_ts",
                rusqlite::params![key, value, now],
            )
            .with_context(|| format!("Failed to write key: {}", key))?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", [key])
            .with_context(|| format!("Failed to delete key: {}", key))?;
        Ok(())
    }
}

/// In-process blob store for tests and dry runs
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    entries: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with one key already present
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
