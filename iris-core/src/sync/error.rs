use std::path::PathBuf;
use thiserror::Error;

use super::conflict::ConflictStrategy;
use crate::remote::RemoteError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Not signed in. Sign in before syncing.")]
    NotAuthenticated,

    #[error("Local store error: {0}")]
    Store(#[from] StoreError),

    #[error("Remote service error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Cannot read recording {0:?}: {1}")]
    Attachment(PathBuf, #[source] std::io::Error),

    #[error("Conflict strategy '{0}' is not implemented yet")]
    StrategyNotImplemented(ConflictStrategy),
}
