//! Iris Core Library
//!
//! Mood and journal records, their local store, and the sync rules that
//! keep them in step with the hosted backend.

pub mod convert;
pub mod models;
pub mod remote;
pub mod store;
pub mod sync;

pub use models::{
    EntryType, JournalEntry, MoodCategory, MoodDisplay, MoodEntry, Privacy, SyncStatus,
};
pub use remote::{InMemoryRemote, RemoteDataService, RemoteError, RestClient, Session};
pub use store::{DateFlag, Flag, LocalStore, StoreError};
pub use sync::{
    ConflictStrategy, FullSyncReport, MergeReport, PullReport, PushReport, SyncCoordinator,
    SyncError, SyncOptions, SyncState, SyncStats, WriteOutcome,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
