use rusqlite::Connection;
use std::path::Path;
use anyhow::{Context, Result};
use crate::db::migrations::MigrationManager;

/// Database connection manager
pub struct DbConnection;

impl DbConnection {
    /// Connect to the database at `db_path`, creating it and parent directories if needed
    pub fn connect(db_path: &Path) -> Result<Connection> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

        MigrationManager::initialize(&conn)
            .context("Failed to initialize database schema")?;

        log::debug!("opened database {}", db_path.display());
        Ok(conn)
    }

    /// Connect to an in-memory database (for testing)
    pub fn connect_in_memory() -> Result<Connection> {
        let conn = Connection::open_in_memory()
            .context("Failed to open in-memory database")?;

        MigrationManager::initialize(&conn)
            .context("Failed to initialize database schema")?;

        Ok(conn)
    }
}
