use std::path::PathBuf;
use thiserror::Error;

/// Errors from the local store. Decode failures never show up here; they
/// are treated as missing values.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error for {0:?}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
