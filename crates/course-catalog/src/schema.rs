// Catalog schema and database management

use crate::error::CatalogResult;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Whether to enable WAL mode
    pub wal_enabled: bool,

    /// Cache size in pages
    pub cache_size_pages: Option<usize>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            wal_enabled: true,
            cache_size_pages: Some(2000),
        }
    }
}

/// Main catalog interface
pub struct Catalog {
    conn: Connection,
    config: CatalogConfig,
}

impl Catalog {
    /// Open catalog with default config
    pub fn open<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        Self::open_with_config(path, CatalogConfig::default())
    }

    /// Open catalog with custom config
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: CatalogConfig) -> CatalogResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        debug!("Opened course catalog at {}", path.as_ref().display());
        Self::from_connection(conn, config)
    }

    /// Open a private in-memory catalog
    pub fn open_in_memory() -> CatalogResult<Self> {
        let config = CatalogConfig {
            wal_enabled: false,
            ..CatalogConfig::default()
        };
        Self::from_connection(Connection::open_in_memory()?, config)
    }

    fn from_connection(conn: Connection, config: CatalogConfig) -> CatalogResult<Self> {
        if config.wal_enabled {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }

        if let Some(cache_size) = config.cache_size_pages {
            conn.pragma_update(None, "cache_size", cache_size)?;
        }

        let mut catalog = Self { conn, config };
        catalog.initialize_schema()?;

        Ok(catalog)
    }

    /// Initialize database schema
    fn initialize_schema(&mut self) -> CatalogResult<()> {
        // Array columns hold JSON text; NULL reads back as an empty list
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS courses (
                course_code TEXT PRIMARY KEY,
                course_title TEXT NOT NULL DEFAULT '',
                department TEXT NOT NULL DEFAULT '',
                university TEXT NOT NULL DEFAULT '',
                credits REAL NOT NULL DEFAULT 0,
                semester TEXT NOT NULL DEFAULT '',
                instructor_name TEXT,
                instructor_email TEXT,
                instructor_office_hours TEXT,
                description TEXT NOT NULL DEFAULT '',
                prerequisites TEXT,
                learning_outcomes TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_courses_department ON courses(department)",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_courses_semester ON courses(semester)",
            [],
        )?;

        Ok(())
    }

    /// Get the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Get mutable connection
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Checkpoint the WAL into the main database file
    pub fn close(&mut self) -> CatalogResult<()> {
        if self.config.wal_enabled {
            self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE)")?;
        }
        Ok(())
    }
}
