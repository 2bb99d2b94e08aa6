//! Local-first synchronization between the on-device store and the remote
//! service.
//!
//! [`SyncCoordinator`] owns the rules:
//!
//! - writes always land locally first; remote failures after a successful
//!   local write are reported as [`WriteOutcome::SyncPending`]
//! - push and pull are additive, matching records by calendar day
//! - merge is the only place the remote copy overrides a local one
//! - without a signed-in session every sync operation returns an empty
//!   report

mod conflict;
mod coordinator;
mod error;
mod options;
mod report;
mod state;

pub use conflict::ConflictStrategy;
pub use coordinator::SyncCoordinator;
pub use error::SyncError;
pub use options::{SyncOptions, DEFAULT_BACKGROUND_INTERVAL_MINUTES, DEFAULT_WINDOW_DAYS};
pub use report::{FullSyncReport, MergeReport, PullReport, PushReport, SyncStats, WriteOutcome};
pub use state::SyncState;
