//! Test utilities for database setup.
//!
//! Provides a helper that reuses authoritative schema initialization,
//! eliminating schema duplication in test code.

use rusqlite::Connection;
use std::path::Path;
use std::sync::MutexGuard;
use tempfile::TempDir;

use crate::db::{init_db, DbPool};

/// Test environment with a store initialized through the real migration
/// path, in a temporary directory that cleans up when dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    pool: DbPool,
}

impl TestEnv {
    /// Create a test environment with the database initialized via
    /// `crate::db::init_db` (the production path, migrations included).
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let db_path = temp.path().join("review.db");
        let pool = init_db(&db_path)?;

        Ok(Self { temp, pool })
    }

    /// Handle to the pool, for constructing routers
    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Direct connection guard, for seeding test data
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.pool.lock().expect("test database lock poisoned")
    }

    /// Get the temporary directory path for creating test files.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}
