//! In-process stand-in for the hosted backend.
//!
//! Keeps rows and blobs in memory, records every call it receives, and can
//! be told to fail. Used as the remote in tests and for offline runs.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::error::RemoteError;
use super::rows::{JournalEntryRow, MoodEntryRow, NewJournalEntryRow, NewMoodEntryRow};
use super::{RemoteDataService, Session};

/// A call received by [`InMemoryRemote`].
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    SignIn(String),
    SignOut,
    InsertMood(NaiveDate),
    UpdateMood(Uuid),
    FetchMoods { from: NaiveDate, to: NaiveDate },
    InsertJournal(Uuid),
    UpdateJournal(Uuid),
    DeleteJournal(Uuid),
    FetchJournals { from: NaiveDate, to: NaiveDate },
    UploadBlob(String),
    DownloadBlob(String),
    DeleteBlob(String),
}

#[derive(Debug, Default)]
struct MemoryState {
    session: Option<Session>,
    accounts: HashMap<String, (String, String)>,
    moods: Vec<MoodEntryRow>,
    journals: Vec<JournalEntryRow>,
    blobs: HashMap<String, Vec<u8>>,
    calls: Vec<RemoteCall>,
    failure: Option<RemoteError>,
    failing_days: HashSet<NaiveDate>,
}

#[derive(Debug, Default)]
pub struct InMemoryRemote {
    state: Mutex<MemoryState>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// A remote that already holds a session for `user_id`.
    pub fn signed_in(user_id: &str) -> Self {
        let remote = Self::new();
        remote.state().session = Some(Session {
            user_id: user_id.to_string(),
            email: None,
            access_token: format!("token-{}", user_id),
        });
        remote
    }

    /// Registers credentials accepted by `sign_in`.
    pub fn with_account(self, email: &str, password: &str, user_id: &str) -> Self {
        self.state().accounts.insert(
            email.to_string(),
            (password.to_string(), user_id.to_string()),
        );
        self
    }

    /// Makes every subsequent data call fail with `error`; `None` heals.
    pub fn set_failure(&self, error: Option<RemoteError>) {
        self.state().failure = error;
    }

    /// Makes mood inserts for `date` fail.
    pub fn fail_inserts_on(&self, date: NaiveDate) {
        self.state().failing_days.insert(date);
    }

    pub fn seed_mood(&self, row: MoodEntryRow) {
        self.state().moods.push(row);
    }

    pub fn mood_rows(&self) -> Vec<MoodEntryRow> {
        self.state().moods.clone()
    }

    pub fn journal_rows(&self) -> Vec<JournalEntryRow> {
        self.state().journals.clone()
    }

    pub fn blob(&self, bucket: &str, path: &str) -> Option<Vec<u8>> {
        self.state().blobs.get(&blob_key(bucket, path)).cloned()
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.state().calls.clone()
    }

    pub fn mood_insert_count(&self) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| matches!(c, RemoteCall::InsertMood(_)))
            .count()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Records the call, then applies injected failures.
    fn begin(&self, call: RemoteCall) -> Result<MutexGuard<'_, MemoryState>, RemoteError> {
        let mut state = self.state();
        state.calls.push(call);
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        if state.session.is_none() {
            return Err(RemoteError::NotAuthenticated);
        }
        Ok(state)
    }
}

fn blob_key(bucket: &str, path: &str) -> String {
    format!("{}/{}", bucket, path)
}

fn not_found(what: impl std::fmt::Display) -> RemoteError {
    RemoteError::Http {
        status: 404,
        message: format!("{} not found", what),
    }
}

#[async_trait]
impl RemoteDataService for InMemoryRemote {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, RemoteError> {
        let mut state = self.state();
        state.calls.push(RemoteCall::SignIn(email.to_string()));
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }

        let user_id = match state.accounts.get(email) {
            Some((expected, user_id)) if expected == password => user_id.clone(),
            _ => {
                return Err(RemoteError::Http {
                    status: 400,
                    message: "Invalid login credentials".to_string(),
                })
            }
        };

        let session = Session {
            user_id: user_id.clone(),
            email: Some(email.to_string()),
            access_token: format!("token-{}", user_id),
        };
        state.session = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), RemoteError> {
        let mut state = self.state();
        state.calls.push(RemoteCall::SignOut);
        state.session = None;
        Ok(())
    }

    fn current_user_id(&self) -> Option<String> {
        self.state().session.as_ref().map(|s| s.user_id.clone())
    }

    async fn insert_mood_entry(&self, row: &NewMoodEntryRow) -> Result<MoodEntryRow, RemoteError> {
        let mut state = self.begin(RemoteCall::InsertMood(row.date))?;
        if state.failing_days.contains(&row.date) {
            return Err(RemoteError::Network("connection reset".to_string()));
        }
        if state.moods.iter().any(|m| m.id == row.id) {
            return Err(RemoteError::Http {
                status: 409,
                message: "duplicate key value violates unique constraint".to_string(),
            });
        }
        let stored = row.clone().into_row();
        state.moods.push(stored.clone());
        Ok(stored)
    }

    async fn update_mood_entry(&self, row: &NewMoodEntryRow) -> Result<MoodEntryRow, RemoteError> {
        let mut state = self.begin(RemoteCall::UpdateMood(row.id))?;
        let existing = state
            .moods
            .iter_mut()
            .find(|m| m.id == row.id)
            .ok_or_else(|| not_found(row.id))?;
        let mut updated = row.clone().into_row();
        updated.created_at = existing.created_at;
        updated.updated_at = Some(Utc::now());
        *existing = updated.clone();
        Ok(updated)
    }

    async fn fetch_mood_entries(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<MoodEntryRow>, RemoteError> {
        let state = self.begin(RemoteCall::FetchMoods { from, to })?;
        let mut rows: Vec<MoodEntryRow> = state
            .moods
            .iter()
            .filter(|m| m.user_id == user_id && m.date >= from && m.date <= to)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    async fn insert_journal_entry(
        &self,
        row: &NewJournalEntryRow,
    ) -> Result<JournalEntryRow, RemoteError> {
        let mut state = self.begin(RemoteCall::InsertJournal(row.id))?;
        let stored = row.clone().into_row();
        state.journals.retain(|j| j.id != row.id);
        state.journals.push(stored.clone());
        Ok(stored)
    }

    async fn update_journal_entry(
        &self,
        row: &NewJournalEntryRow,
    ) -> Result<JournalEntryRow, RemoteError> {
        let mut state = self.begin(RemoteCall::UpdateJournal(row.id))?;
        let existing = state
            .journals
            .iter_mut()
            .find(|j| j.id == row.id)
            .ok_or_else(|| not_found(row.id))?;
        let mut updated = row.clone().into_row();
        updated.updated_at = Some(Utc::now());
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete_journal_entry(&self, id: Uuid) -> Result<(), RemoteError> {
        let mut state = self.begin(RemoteCall::DeleteJournal(id))?;
        state.journals.retain(|j| j.id != id);
        Ok(())
    }

    async fn fetch_journal_entries(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<JournalEntryRow>, RemoteError> {
        let state = self.begin(RemoteCall::FetchJournals { from, to })?;
        let mut rows: Vec<JournalEntryRow> = state
            .journals
            .iter()
            .filter(|j| {
                let day = j.created_at.date_naive();
                j.user_id == user_id && day >= from && day <= to
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn upload_blob(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, RemoteError> {
        let mut state = self.begin(RemoteCall::UploadBlob(blob_key(bucket, path)))?;
        state.blobs.insert(blob_key(bucket, path), bytes);
        Ok(path.to_string())
    }

    async fn download_blob(&self, bucket: &str, path: &str) -> Result<Vec<u8>, RemoteError> {
        let key = blob_key(bucket, path);
        let state = self.begin(RemoteCall::DownloadBlob(key.clone()))?;
        state.blobs.get(&key).cloned().ok_or_else(|| not_found(key))
    }

    async fn delete_blob(&self, bucket: &str, path: &str) -> Result<(), RemoteError> {
        let key = blob_key(bucket, path);
        let mut state = self.begin(RemoteCall::DeleteBlob(key.clone()))?;
        state.blobs.remove(&key);
        Ok(())
    }
}
