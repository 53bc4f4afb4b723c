use rusqlite::{Connection, Result};
use std::collections::HashMap;

/// Current database schema version
const CURRENT_VERSION: u32 = 1;

/// Migration system for managing database schema versions
pub struct MigrationManager;

impl MigrationManager {
    /// Initialize the database with the current schema
    /// This creates the schema_version table and applies all migrations
    pub fn initialize(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            )",
            [],
        )?;

        let current_version: u32 = Self::get_version(conn).unwrap_or(0);

        for version in (current_version + 1)..=CURRENT_VERSION {
            Self::apply_migration(conn, version)?;
        }

        Ok(())
    }

    /// Apply a specific migration by version number
    fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
        let migrations = get_migrations();
        if let Some(migration) = migrations.get(&version) {
            let tx = conn.unchecked_transaction()?;
            migration(&tx)?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [version],
            )?;
            tx.commit()?;
            log::debug!("applied schema migration v{}", version);
            Ok(())
        } else {
            Err(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_MISUSE),
                Some(format!("No migration found for version {}", version)),
            ))
        }
    }

    /// Get the current schema version
    pub fn get_version(conn: &Connection) -> Result<u32> {
        conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
    }
}

/// Get all migrations indexed by version
fn get_migrations() -> HashMap<u32, fn(&rusqlite::Transaction) -> Result<(), rusqlite::Error>> {
    let mut migrations: HashMap<u32, fn(&rusqlite::Transaction) -> Result<(), rusqlite::Error>> = HashMap::new();
    migrations.insert(1, migration_v1);
    migrations
}

/// Migration v1: key-value blob table
fn migration_v1(tx: &rusqlite::Transaction) -> Result<(), rusqlite::Error> {
    // Each key holds one JSON document (the task collection, the undo slot)
    tx.execute(
        "CREATE TABLE kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            modified_ts INTEGER NOT NULL
        )",
        [],
    )?;
    Ok(())
}
