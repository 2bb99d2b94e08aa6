//! The hosted backend, seen from the client.
//!
//! The backend is a third-party service offering authentication, row access
//! to a fixed set of user-scoped tables, and blob storage. This module only
//! describes what the app consumes from it:
//!
//! - [`RemoteDataService`]: the contract the sync coordinator is written
//!   against
//! - [`RestClient`]: the HTTP implementation
//! - [`InMemoryRemote`]: an in-process implementation for tests and
//!   offline use
//!
//! Every table is scoped by `user_id`; callers pass the identifier of the
//! current session explicitly.

mod error;
mod memory;
mod rest;
mod rows;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use error::RemoteError;
pub use memory::{InMemoryRemote, RemoteCall};
pub use rest::RestClient;
pub use rows::{JournalEntryRow, MoodEntryRow, NewJournalEntryRow, NewMoodEntryRow};

/// Bucket holding voice journal recordings, under `<user_id>/`.
pub const JOURNAL_AUDIO_BUCKET: &str = "journal-audio";

/// A signed-in user, cached in memory until sign-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
    pub access_token: String,
}

#[async_trait]
pub trait RemoteDataService: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, RemoteError>;

    /// Drops the cached session even when the service call fails.
    async fn sign_out(&self) -> Result<(), RemoteError>;

    /// Identifier of the cached session, if any. Never touches the network.
    fn current_user_id(&self) -> Option<String>;

    async fn insert_mood_entry(&self, row: &NewMoodEntryRow) -> Result<MoodEntryRow, RemoteError>;

    /// Overwrites the row whose id is `row.id`.
    async fn update_mood_entry(&self, row: &NewMoodEntryRow) -> Result<MoodEntryRow, RemoteError>;

    /// Rows with `from <= date <= to`, newest first.
    async fn fetch_mood_entries(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<MoodEntryRow>, RemoteError>;

    async fn insert_journal_entry(
        &self,
        row: &NewJournalEntryRow,
    ) -> Result<JournalEntryRow, RemoteError>;

    async fn update_journal_entry(
        &self,
        row: &NewJournalEntryRow,
    ) -> Result<JournalEntryRow, RemoteError>;

    async fn delete_journal_entry(&self, id: Uuid) -> Result<(), RemoteError>;

    /// Entries created on days `from..=to`, newest first.
    async fn fetch_journal_entries(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<JournalEntryRow>, RemoteError>;

    /// Stores `bytes` at `bucket/path`, replacing any existing object.
    /// Returns the object path.
    async fn upload_blob(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, RemoteError>;

    async fn download_blob(&self, bucket: &str, path: &str) -> Result<Vec<u8>, RemoteError>;

    async fn delete_blob(&self, bucket: &str, path: &str) -> Result<(), RemoteError>;
}

/// Object path of a journal recording inside [`JOURNAL_AUDIO_BUCKET`].
pub fn journal_audio_path(user_id: &str, entry_id: Uuid) -> String {
    format!("{}/{}.m4a", user_id, entry_id)
}
