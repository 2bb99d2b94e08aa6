//! On-device persistence backed by SQLite.
//!
//! The store owns every local copy: mood entries (one per calendar day),
//! journal entries, named flags, per-record sync status and small cached
//! blobs. Writes are keyed upserts rather than whole-collection rewrites,
//! so a sync running alongside a local save cannot drop the save.
//!
//! Values that fail to decode are treated as absent and logged; the next
//! successful write replaces them.

mod blob_cache;
mod error;
mod flags;
mod journal_repo;
mod mood_repo;
mod sync_status_repo;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;

pub use error::StoreError;
pub use flags::{DateFlag, Flag};

/// Handle to the local database. Cheap to clone.
#[derive(Debug, Clone)]
pub struct LocalStore {
    pool: SqlitePool,
}

impl LocalStore {
    /// Opens (creating if needed) the database at `path` and runs migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Io(parent.to_path_buf(), e))?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .foreign_keys(true)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes every connection; later operations fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
