use std::path::{Path, PathBuf};
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::store::error::Result;

/// Pool of SQLite connections used by the store
pub type DbPool = Pool<SqliteConnectionManager>;

/// Default location of the database file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "./gemini-tool.db";

/// Configuration for the chat store connection
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file (created on first run)
    pub path: PathBuf,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// How long a connection waits on a locked database before failing
    pub busy_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            max_pool_size: 8,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

impl StoreConfig {
    /// Create a configuration for the database at `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Build a connection pool from this configuration
    ///
    /// Every pooled connection has foreign keys enabled and the configured
    /// busy timeout applied.
    pub fn build_pool(&self) -> Result<DbPool> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let busy_timeout = self.busy_timeout;
        let manager = SqliteConnectionManager::file(&self.path).with_init(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")
        });

        let pool = Pool::builder().max_size(self.max_pool_size).build(manager)?;
        Ok(pool)
    }
}

/// Build a single-connection pool over a private in-memory database
///
/// The one connection is never recycled, so the database lives as long as
/// the pool does.
pub fn build_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    let pool = Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(manager)?;
    Ok(pool)
}
