use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::conflict::ConflictStrategy;
use super::error::SyncError;
use super::options::SyncOptions;
use super::report::{
    FullSyncReport, MergeReport, PullReport, PushReport, SyncStats, WriteOutcome,
};
use super::state::SyncState;
use crate::convert::{
    journal_to_row, journals_from_rows, mood_from_row, mood_to_row, moods_from_rows,
};
use crate::models::{JournalEntry, MoodEntry, SyncStatus};
use crate::remote::{
    journal_audio_path, MoodEntryRow, RemoteDataService, RemoteError, JOURNAL_AUDIO_BUCKET,
};
use crate::store::{DateFlag, Flag, LocalStore};

const AUDIO_CONTENT_TYPE: &str = "audio/mp4";

enum PushOutcome {
    Created(Uuid),
    /// The day already has a remote record.
    Exists(Uuid),
}

/// One row per day, newest day first. When the service holds several rows
/// for a day, the most recently written one wins; ids break exact ties.
fn latest_per_day(rows: Vec<MoodEntryRow>) -> Vec<MoodEntryRow> {
    fn written(row: &MoodEntryRow) -> (DateTime<Utc>, Uuid) {
        (row.updated_at.unwrap_or(row.created_at), row.id)
    }

    let mut by_day: BTreeMap<NaiveDate, MoodEntryRow> = BTreeMap::new();
    for row in rows {
        let newer = by_day
            .get(&row.date)
            .map_or(true, |kept| written(&row) > written(kept));
        if newer {
            by_day.insert(row.date, row);
        }
    }
    by_day.into_values().rev().collect()
}

/// Moves mood and journal records between the local store and the remote
/// service.
///
/// Every local write lands in the store first. Remote calls are made one at
/// a time and only while a session exists; without one, sync operations
/// return empty reports.
pub struct SyncCoordinator {
    store: LocalStore,
    remote: Arc<dyn RemoteDataService>,
    options: SyncOptions,
    state: Mutex<SyncState>,
}

impl SyncCoordinator {
    pub fn new(store: LocalStore, remote: Arc<dyn RemoteDataService>, options: SyncOptions) -> Self {
        Self {
            store,
            remote,
            options,
            state: Mutex::new(SyncState::Idle),
        }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn remote(&self) -> &Arc<dyn RemoteDataService> {
        &self.remote
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    pub fn state(&self) -> SyncState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_state(&self, state: SyncState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    /// Inclusive day range covered by pull, merge and list reads.
    pub fn window(&self) -> (NaiveDate, NaiveDate) {
        let today = Local::now().date_naive();
        let from = today
            .checked_sub_days(Days::new(u64::from(self.options.window_days)))
            .unwrap_or(NaiveDate::MIN);
        (from, today)
    }

    fn session_user(&self, operation: &str) -> Option<String> {
        let user_id = self.remote.current_user_id();
        if user_id.is_none() {
            tracing::debug!(operation, "Not signed in, skipping");
        }
        user_id
    }

    /// The signed-in user when cloud sync is enabled.
    async fn active_user(&self) -> Result<Option<String>, SyncError> {
        if !self.store.flag(Flag::CloudSyncEnabled).await? {
            return Ok(None);
        }
        Ok(self.remote.current_user_id())
    }

    /// Runs `work` through the Syncing -> Completed / Failed transitions.
    async fn tracked<T, F>(&self, operation: &str, work: F) -> Result<T, SyncError>
    where
        F: Future<Output = Result<T, SyncError>>,
    {
        self.set_state(SyncState::Syncing);

        match work.await {
            Ok(value) => {
                self.set_state(SyncState::Completed);
                Ok(value)
            }
            Err(e) => {
                tracing::error!(operation, error = %e, "Sync failed");
                self.set_state(SyncState::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    async fn push_mood(&self, user_id: &str, entry: &MoodEntry) -> Result<PushOutcome, RemoteError> {
        if let Some(remote_id) = self.remote_mood_id(user_id, entry.date).await? {
            return Ok(PushOutcome::Exists(remote_id));
        }

        let row = self.remote.insert_mood_entry(&mood_to_row(entry, user_id)).await?;
        Ok(PushOutcome::Created(row.id))
    }

    /// Id of the remote row holding `day`, if any.
    async fn remote_mood_id(&self, user_id: &str, day: NaiveDate) -> Result<Option<Uuid>, RemoteError> {
        let rows = self.remote.fetch_mood_entries(user_id, day, day).await?;
        Ok(latest_per_day(rows).first().map(|row| row.id))
    }

    /// Writes `entry` over the remote row of its day, or creates one when the
    /// day has none. Returns the remote row id.
    async fn write_mood(
        &self,
        user_id: &str,
        entry: &MoodEntry,
        known: Option<Uuid>,
    ) -> Result<Uuid, RemoteError> {
        let existing = match known {
            Some(remote_id) => Some(remote_id),
            None => self.remote_mood_id(user_id, entry.date).await?,
        };

        let mut row = mood_to_row(entry, user_id);
        let stored = match existing {
            Some(remote_id) => {
                row.id = remote_id;
                self.remote.update_mood_entry(&row).await?
            }
            None => self.remote.insert_mood_entry(&row).await?,
        };
        Ok(stored.id)
    }

    /// Sends every local mood not yet synced. A day that already exists
    /// remotely is skipped, never updated. Failures are recorded per record
    /// and do not stop the batch.
    pub async fn push(&self) -> Result<PushReport, SyncError> {
        let mut report = PushReport::default();
        let Some(user_id) = self.session_user("push") else {
            return Ok(report);
        };

        let statuses = self.store.sync_statuses().await?;
        let pending: Vec<MoodEntry> = self
            .store
            .load_all_moods()
            .await?
            .into_iter()
            .filter(|e| !statuses.get(&e.id).is_some_and(|s| s.is_synced))
            .collect();

        for entry in &pending {
            match self.push_mood(&user_id, entry).await {
                Ok(PushOutcome::Created(remote_id)) => {
                    report.created += 1;
                    self.store
                        .set_sync_status(&SyncStatus::synced(entry.id, remote_id))
                        .await?;
                }
                Ok(PushOutcome::Exists(remote_id)) => {
                    report.skipped += 1;
                    self.store
                        .set_sync_status(&SyncStatus::synced(entry.id, remote_id))
                        .await?;
                }
                Err(e) => {
                    tracing::warn!(date = %entry.date, error = %e, "Failed to push mood entry");
                    report.failed += 1;
                    report.errors.push(format!("{}: {}", entry.date, e));
                    self.store
                        .set_sync_status(&SyncStatus::failed(entry.id, e.to_string()))
                        .await?;
                }
            }
        }

        tracing::info!(
            created = report.created,
            skipped = report.skipped,
            failed = report.failed,
            "Push finished"
        );
        Ok(report)
    }

    /// Copies remote moods from the window into days that have no local
    /// record. Existing local records are never overwritten.
    pub async fn pull(&self) -> Result<PullReport, SyncError> {
        let mut report = PullReport::default();
        let Some(user_id) = self.session_user("pull") else {
            return Ok(report);
        };

        let (from, to) = self.window();
        let rows = match self.remote.fetch_mood_entries(&user_id, from, to).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch remote mood entries");
                report.errors.push(e.to_string());
                return Ok(report);
            }
        };
        report.fetched = rows.len();

        for row in &latest_per_day(rows) {
            let entry = mood_from_row(row);
            if self.store.insert_mood_if_day_absent(&entry).await? {
                self.store
                    .set_sync_status(&SyncStatus::synced(entry.id, row.id))
                    .await?;
                report.inserted += 1;
            } else {
                report.kept_local += 1;
            }
        }

        tracing::info!(
            fetched = report.fetched,
            inserted = report.inserted,
            "Pull finished"
        );
        Ok(report)
    }

    /// Makes the remote copy authoritative for every day it has in the
    /// window. Days without a remote record keep their local copy.
    pub async fn merge(&self) -> Result<MergeReport, SyncError> {
        let mut report = MergeReport::default();
        let Some(user_id) = self.session_user("merge") else {
            return Ok(report);
        };

        let (from, to) = self.window();
        let rows = match self.remote.fetch_mood_entries(&user_id, from, to).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch remote mood entries");
                report.errors.push(e.to_string());
                return Ok(report);
            }
        };

        let mut remote_days = BTreeSet::new();
        for row in &latest_per_day(rows) {
            let entry = mood_from_row(row);
            self.store.replace_mood_for_day(&entry).await?;
            self.store
                .set_sync_status(&SyncStatus::synced(entry.id, row.id))
                .await?;
            remote_days.insert(entry.date);
        }

        let merged = self.store.load_all_moods().await?;
        report.remote = remote_days.len();
        report.total = merged.len();
        report.local_only = merged
            .iter()
            .filter(|e| !remote_days.contains(&e.date))
            .count();

        tracing::info!(
            remote = report.remote,
            local_only = report.local_only,
            "Merge finished"
        );
        Ok(report)
    }

    /// Push then pull. Only local store errors fail the run.
    pub async fn full_sync(&self) -> Result<FullSyncReport, SyncError> {
        if self.session_user("full sync").is_none() {
            return Ok(FullSyncReport::default());
        }

        self.tracked("full sync", async {
            let push = self.push().await?;
            let pull = self.pull().await?;
            self.store
                .set_date_flag(DateFlag::LastFullSync, Utc::now())
                .await?;
            Ok(FullSyncReport { push, pull })
        })
        .await
    }

    /// Pulls the whole window and records the incremental marker. The
    /// marker does not narrow what is fetched.
    pub async fn incremental_sync(&self) -> Result<PullReport, SyncError> {
        if self.session_user("incremental sync").is_none() {
            return Ok(PullReport::default());
        }

        self.tracked("incremental sync", async {
            let pull = self.pull().await?;
            self.store
                .set_date_flag(DateFlag::LastIncrementalSync, Utc::now())
                .await?;
            Ok(pull)
        })
        .await
    }

    /// Turning cloud sync on pushes right away. Turning it off leaves
    /// remote data alone.
    pub async fn set_cloud_sync_enabled(&self, enabled: bool) -> Result<Option<PushReport>, SyncError> {
        self.store.set_flag(Flag::CloudSyncEnabled, enabled).await?;
        tracing::info!(enabled, "Cloud sync toggled");

        if enabled {
            Ok(Some(self.push().await?))
        } else {
            Ok(None)
        }
    }

    pub async fn set_background_sync_enabled(&self, enabled: bool) -> Result<(), SyncError> {
        self.store
            .set_flag(Flag::BackgroundSyncEnabled, enabled)
            .await?;
        Ok(())
    }

    /// Saves `entry` as the mood of its day, then writes it remotely when
    /// cloud sync is active. The remote row of that day is overwritten when
    /// one exists, so the service keeps one row per day. A local failure
    /// aborts before any remote call.
    pub async fn save_mood(&self, entry: &MoodEntry) -> Result<WriteOutcome, SyncError> {
        self.store.replace_mood_for_day(entry).await?;

        let Some(user_id) = self.active_user().await? else {
            return Ok(WriteOutcome::LocalOnly);
        };

        let known = self
            .store
            .sync_status(entry.id)
            .await?
            .and_then(|s| s.remote_id);

        match self.write_mood(&user_id, entry, known).await {
            Ok(remote_id) => {
                self.store
                    .set_sync_status(&SyncStatus::synced(entry.id, remote_id))
                    .await?;
                Ok(WriteOutcome::Synced { remote_id })
            }
            Err(e) => {
                tracing::warn!(date = %entry.date, error = %e, "Mood saved locally, remote write failed");
                let mut status = SyncStatus::failed(entry.id, e.to_string());
                status.remote_id = known;
                self.store.set_sync_status(&status).await?;
                Ok(WriteOutcome::SyncPending {
                    error: e.to_string(),
                })
            }
        }
    }

    /// Local only; the remote service offers no mood deletion.
    pub async fn delete_mood(&self, id: Uuid) -> Result<bool, SyncError> {
        Ok(self.store.delete_mood(id).await?)
    }

    /// Remote copy first when cloud sync is active, local copy when the
    /// remote fails or has nothing for that day.
    pub async fn mood_for_day(&self, day: NaiveDate) -> Result<Option<MoodEntry>, SyncError> {
        if let Some(user_id) = self.active_user().await? {
            match self.remote.fetch_mood_entries(&user_id, day, day).await {
                Ok(rows) => {
                    if let Some(row) = latest_per_day(rows).first() {
                        return Ok(Some(mood_from_row(row)));
                    }
                    tracing::debug!(%day, "No remote mood entry, reading local copy");
                }
                Err(e) => {
                    tracing::warn!(%day, error = %e, "Remote read failed, reading local copy");
                }
            }
        }

        Ok(self.store.mood_for_day(day).await?)
    }

    /// Moods with `from <= day <= to`, newest first.
    pub async fn list_moods(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<MoodEntry>, SyncError> {
        if let Some(user_id) = self.active_user().await? {
            match self.remote.fetch_mood_entries(&user_id, from, to).await {
                Ok(rows) => return Ok(moods_from_rows(&latest_per_day(rows))),
                Err(e) => {
                    tracing::warn!(error = %e, "Remote read failed, reading local copies");
                }
            }
        }

        Ok(self.store.moods_in_range(from, to).await?)
    }

    async fn push_journal(
        &self,
        user_id: &str,
        entry: &JournalEntry,
        update: bool,
    ) -> Result<Uuid, SyncError> {
        let audio_url = match &entry.audio_path {
            Some(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|e| SyncError::Attachment(path.clone(), e))?;
                let object = journal_audio_path(user_id, entry.id);
                Some(
                    self.remote
                        .upload_blob(JOURNAL_AUDIO_BUCKET, &object, bytes, AUDIO_CONTENT_TYPE)
                        .await?,
                )
            }
            None => None,
        };

        let row = journal_to_row(entry, user_id, audio_url);
        let stored = if update {
            self.remote.update_journal_entry(&row).await?
        } else {
            self.remote.insert_journal_entry(&row).await?
        };
        Ok(stored.id)
    }

    /// Saves the entry locally, then uploads its recording and writes the
    /// row remotely when cloud sync is active. Entries synced before are
    /// updated in place.
    pub async fn save_journal(&self, entry: &JournalEntry) -> Result<WriteOutcome, SyncError> {
        self.store.upsert_journal(entry).await?;

        let Some(user_id) = self.active_user().await? else {
            return Ok(WriteOutcome::LocalOnly);
        };

        let previous = self.store.sync_status(entry.id).await?;
        let update = previous.as_ref().is_some_and(|s| s.remote_id.is_some());

        match self.push_journal(&user_id, entry, update).await {
            Ok(remote_id) => {
                self.store
                    .set_sync_status(&SyncStatus::synced(entry.id, remote_id))
                    .await?;
                Ok(WriteOutcome::Synced { remote_id })
            }
            Err(e) => {
                tracing::warn!(id = %entry.id, error = %e, "Journal saved locally, remote write failed");
                let mut status = SyncStatus::failed(entry.id, e.to_string());
                status.remote_id = previous.and_then(|s| s.remote_id);
                self.store.set_sync_status(&status).await?;
                Ok(WriteOutcome::SyncPending {
                    error: e.to_string(),
                })
            }
        }
    }

    /// Journal entries created on days `from..=to`, newest first.
    pub async fn list_journals(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<JournalEntry>, SyncError> {
        if let Some(user_id) = self.active_user().await? {
            match self.remote.fetch_journal_entries(&user_id, from, to).await {
                Ok(rows) => return Ok(journals_from_rows(&rows)),
                Err(e) => {
                    tracing::warn!(error = %e, "Remote read failed, reading local copies");
                }
            }
        }

        Ok(self.store.journals_in_range(from, to).await?)
    }

    pub async fn journal(&self, id: Uuid) -> Result<Option<JournalEntry>, SyncError> {
        Ok(self.store.journal_by_id(id).await?)
    }

    /// Deletes the entry locally, then its remote row and recording when it
    /// had been synced. `None` when no such entry exists locally.
    pub async fn delete_journal(&self, id: Uuid) -> Result<Option<WriteOutcome>, SyncError> {
        let Some(entry) = self.store.journal_by_id(id).await? else {
            return Ok(None);
        };
        let status = self.store.sync_status(id).await?;
        self.store.delete_journal(id).await?;

        let Some(user_id) = self.active_user().await? else {
            return Ok(Some(WriteOutcome::LocalOnly));
        };
        let Some(remote_id) = status.and_then(|s| s.remote_id) else {
            return Ok(Some(WriteOutcome::LocalOnly));
        };

        let result = async {
            self.remote.delete_journal_entry(remote_id).await?;
            if entry.audio_path.is_some() || entry.entry_type.has_voice() {
                self.remote
                    .delete_blob(JOURNAL_AUDIO_BUCKET, &journal_audio_path(&user_id, id))
                    .await?;
            }
            Ok::<_, RemoteError>(())
        }
        .await;

        Ok(Some(match result {
            Ok(()) => WriteOutcome::Synced { remote_id },
            Err(e) => {
                tracing::warn!(%id, error = %e, "Journal deleted locally, remote delete failed");
                WriteOutcome::SyncPending {
                    error: e.to_string(),
                }
            }
        }))
    }

    /// Bytes of an entry's recording: the uploaded copy when cloud sync is
    /// active, otherwise (or when that fails) the local file.
    pub async fn journal_audio(&self, id: Uuid) -> Result<Option<Vec<u8>>, SyncError> {
        if let Some(user_id) = self.active_user().await? {
            match self
                .remote
                .download_blob(JOURNAL_AUDIO_BUCKET, &journal_audio_path(&user_id, id))
                .await
            {
                Ok(bytes) => return Ok(Some(bytes)),
                Err(e) => {
                    tracing::warn!(%id, error = %e, "Remote recording unavailable, reading local file");
                }
            }
        }

        let Some(path) = self.store.journal_by_id(id).await?.and_then(|e| e.audio_path) else {
            return Ok(None);
        };
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SyncError::Attachment(path, e)),
        }
    }

    /// One-time upload of every local mood. Unlike push, the first remote
    /// error aborts the run and is returned. Later calls do nothing.
    pub async fn migrate_local_to_cloud(&self) -> Result<PushReport, SyncError> {
        if self.store.flag(Flag::MigrationCompleted).await? {
            tracing::debug!("Migration already completed");
            return Ok(PushReport::default());
        }
        let user_id = self
            .remote
            .current_user_id()
            .ok_or(SyncError::NotAuthenticated)?;

        let mut report = PushReport::default();
        for entry in self.store.load_all_moods().await? {
            let remote_id = match self.push_mood(&user_id, &entry).await? {
                PushOutcome::Created(id) => {
                    report.created += 1;
                    id
                }
                PushOutcome::Exists(id) => {
                    report.skipped += 1;
                    id
                }
            };
            self.store
                .set_sync_status(&SyncStatus::synced(entry.id, remote_id))
                .await?;
        }

        self.store.set_flag(Flag::MigrationCompleted, true).await?;
        self.store
            .set_date_flag(DateFlag::MigrationCompleted, Utc::now())
            .await?;

        tracing::info!(
            created = report.created,
            skipped = report.skipped,
            "Migration finished"
        );
        Ok(report)
    }

    /// Runs a full sync when background and cloud sync are on and the last
    /// full sync is older than the configured interval.
    pub async fn run_background_sync(&self) -> Result<Option<FullSyncReport>, SyncError> {
        if !self.store.flag(Flag::BackgroundSyncEnabled).await?
            || !self.store.flag(Flag::CloudSyncEnabled).await?
        {
            return Ok(None);
        }

        if let Some(last) = self.store.date_flag(DateFlag::LastFullSync).await? {
            if Utc::now() - last < self.options.background_interval {
                tracing::debug!(%last, "Background sync not due yet");
                return Ok(None);
            }
        }

        Ok(Some(self.full_sync().await?))
    }

    pub async fn resolve_conflicts(&self, strategy: ConflictStrategy) -> Result<MergeReport, SyncError> {
        match strategy {
            ConflictStrategy::CloudWins => self.merge().await,
            other => Err(SyncError::StrategyNotImplemented(other)),
        }
    }

    pub async fn stats(&self) -> Result<SyncStats, SyncError> {
        let statuses = self.store.sync_statuses().await?;
        let moods = self.store.load_all_moods().await?;
        let journals = self.store.load_all_journals().await?;

        let ids = moods.iter().map(|m| m.id).chain(journals.iter().map(|j| j.id));
        let (mut synced, mut failed, mut pending) = (0, 0, 0);
        for id in ids {
            match statuses.get(&id) {
                Some(s) if s.is_synced => synced += 1,
                Some(s) if s.has_failed() => failed += 1,
                _ => pending += 1,
            }
        }

        Ok(SyncStats {
            state: self.state(),
            signed_in_user: self.remote.current_user_id(),
            cloud_sync_enabled: self.store.flag(Flag::CloudSyncEnabled).await?,
            background_sync_enabled: self.store.flag(Flag::BackgroundSyncEnabled).await?,
            migration_completed: self.store.flag(Flag::MigrationCompleted).await?,
            last_full_sync: self.store.date_flag(DateFlag::LastFullSync).await?,
            last_incremental_sync: self.store.date_flag(DateFlag::LastIncrementalSync).await?,
            moods: moods.len(),
            journals: journals.len(),
            synced,
            pending,
            failed,
        })
    }

    /// Forgets what has been synced: every record becomes pending and the
    /// sync dates are cleared.
    pub async fn reset_sync_cache(&self) -> Result<u64, SyncError> {
        let reset = self.store.reset_sync_statuses().await?;
        self.store.clear_date_flag(DateFlag::LastFullSync).await?;
        self.store
            .clear_date_flag(DateFlag::LastIncrementalSync)
            .await?;
        self.set_state(SyncState::Idle);
        tracing::info!(reset, "Sync cache reset");
        Ok(reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MoodCategory;
    use crate::remote::{InMemoryRemote, MoodEntryRow, RemoteCall};
    use crate::store::test_support::temp_store;
    use tempfile::TempDir;

    const USER: &str = "user-1";

    fn days_ago(n: u64) -> NaiveDate {
        Local::now()
            .date_naive()
            .checked_sub_days(Days::new(n))
            .unwrap()
    }

    fn remote_row(date: NaiveDate, category: MoodCategory) -> MoodEntryRow {
        let entry = MoodEntry::new(date, category).with_note("from the cloud");
        mood_to_row(&entry, USER).into_row()
    }

    async fn coordinator_with(remote: InMemoryRemote) -> (SyncCoordinator, Arc<InMemoryRemote>, TempDir) {
        let (store, temp_dir) = temp_store().await;
        let remote = Arc::new(remote);
        let coordinator = SyncCoordinator::new(store, remote.clone(), SyncOptions::default());
        (coordinator, remote, temp_dir)
    }

    async fn signed_in() -> (SyncCoordinator, Arc<InMemoryRemote>, TempDir) {
        coordinator_with(InMemoryRemote::signed_in(USER)).await
    }

    async fn save_local(coordinator: &SyncCoordinator, date: NaiveDate, note: &str) -> MoodEntry {
        let entry = MoodEntry::new(date, MoodCategory::Good).with_note(note);
        coordinator.store().replace_mood_for_day(&entry).await.unwrap();
        entry
    }

    async fn enable_cloud(coordinator: &SyncCoordinator) {
        coordinator
            .store()
            .set_flag(Flag::CloudSyncEnabled, true)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_new_coordinator_is_idle() {
        let (coordinator, _remote, _temp) = signed_in().await;
        assert_eq!(coordinator.state(), SyncState::Idle);
    }

    #[tokio::test]
    async fn test_push_creates_every_unsynced_day() {
        let (coordinator, remote, _temp) = signed_in().await;
        for n in 1..=3 {
            save_local(&coordinator, days_ago(n), "local").await;
        }

        let report = coordinator.push().await.unwrap();
        assert_eq!(report.created, 3);
        assert_eq!(report.failed, 0);
        assert_eq!(remote.mood_insert_count(), 3);

        let statuses = coordinator.store().sync_statuses().await.unwrap();
        assert!(statuses.values().all(|s| s.is_synced));

        let again = coordinator.push().await.unwrap();
        assert_eq!(again, PushReport::default());
        assert_eq!(remote.mood_insert_count(), 3);
    }

    #[tokio::test]
    async fn test_push_skips_day_already_remote() {
        let (coordinator, remote, _temp) = signed_in().await;
        remote.seed_mood(remote_row(days_ago(1), MoodCategory::Bad));
        save_local(&coordinator, days_ago(1), "local version").await;

        let report = coordinator.push().await.unwrap();
        assert_eq!(report.created, 0);
        assert_eq!(report.skipped, 1);
        assert_eq!(remote.mood_insert_count(), 0);

        let rows = remote.mood_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].note_text.as_deref(), Some("from the cloud"));
    }

    #[tokio::test]
    async fn test_push_failure_does_not_stop_batch() {
        let (coordinator, remote, _temp) = signed_in().await;
        save_local(&coordinator, days_ago(1), "a").await;
        let failing = save_local(&coordinator, days_ago(2), "b").await;
        save_local(&coordinator, days_ago(3), "c").await;
        remote.fail_inserts_on(days_ago(2));

        let report = coordinator.push().await.unwrap();
        assert_eq!(report.created, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.errors.len(), 1);

        let status = coordinator.store().sync_status(failing.id).await.unwrap().unwrap();
        assert!(status.has_failed());
        assert!(status.last_error.unwrap().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_pull_never_overwrites_local_day() {
        let (coordinator, remote, _temp) = signed_in().await;
        save_local(&coordinator, days_ago(1), "mine").await;
        remote.seed_mood(remote_row(days_ago(1), MoodCategory::Excellent));
        remote.seed_mood(remote_row(days_ago(3), MoodCategory::Neutral));

        let report = coordinator.pull().await.unwrap();
        assert_eq!(report.fetched, 2);
        assert_eq!(report.inserted, 1);
        assert_eq!(report.kept_local, 1);

        let kept = coordinator.store().mood_for_day(days_ago(1)).await.unwrap().unwrap();
        assert_eq!(kept.note, "mine");
        assert_eq!(kept.category, MoodCategory::Good);

        let pulled = coordinator.store().mood_for_day(days_ago(3)).await.unwrap().unwrap();
        assert_eq!(pulled.note, "from the cloud");
        let status = coordinator.store().sync_status(pulled.id).await.unwrap().unwrap();
        assert!(status.is_synced);
    }

    #[tokio::test]
    async fn test_pull_only_fetches_window() {
        let (coordinator, remote, _temp) = signed_in().await;
        remote.seed_mood(remote_row(days_ago(200), MoodCategory::Bad));

        let report = coordinator.pull().await.unwrap();
        assert_eq!(report.fetched, 0);
        assert!(coordinator.store().load_all_moods().await.unwrap().is_empty());
        assert_eq!(
            remote.calls(),
            vec![RemoteCall::FetchMoods {
                from: days_ago(90),
                to: days_ago(0)
            }]
        );
    }

    #[tokio::test]
    async fn test_pull_fetch_failure_is_reported() {
        let (coordinator, remote, _temp) = signed_in().await;
        remote.set_failure(Some(RemoteError::Network("offline".into())));

        let report = coordinator.pull().await.unwrap();
        assert_eq!(report.fetched, 0);
        assert_eq!(report.errors, vec!["Network error: offline".to_string()]);
    }

    #[tokio::test]
    async fn test_merge_cloud_wins_on_same_day() {
        let (coordinator, remote, _temp) = signed_in().await;
        save_local(&coordinator, days_ago(2), "local copy").await;
        remote.seed_mood(remote_row(days_ago(2), MoodCategory::VeryBad));

        let report = coordinator.merge().await.unwrap();
        assert_eq!(report.remote, 1);
        assert_eq!(report.local_only, 0);
        assert_eq!(report.total, 1);

        let merged = coordinator.store().load_all_moods().await.unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].note, "from the cloud");
        assert_eq!(merged[0].category, MoodCategory::VeryBad);
    }

    #[tokio::test]
    async fn test_merge_keeps_local_only_days() {
        let (coordinator, remote, _temp) = signed_in().await;
        save_local(&coordinator, days_ago(4), "only here").await;
        remote.seed_mood(remote_row(days_ago(5), MoodCategory::Good));

        let report = coordinator.merge().await.unwrap();
        assert_eq!(report.remote, 1);
        assert_eq!(report.local_only, 1);
        assert_eq!(report.total, 2);

        assert_eq!(
            coordinator
                .store()
                .mood_for_day(days_ago(4))
                .await
                .unwrap()
                .unwrap()
                .note,
            "only here"
        );
        assert!(coordinator.store().mood_for_day(days_ago(5)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_signed_out_sync_is_a_no_op() {
        let (coordinator, remote, _temp) = coordinator_with(InMemoryRemote::new()).await;
        save_local(&coordinator, days_ago(1), "offline").await;

        assert_eq!(coordinator.push().await.unwrap(), PushReport::default());
        assert_eq!(coordinator.pull().await.unwrap(), PullReport::default());
        assert_eq!(coordinator.merge().await.unwrap(), MergeReport::default());
        assert_eq!(coordinator.full_sync().await.unwrap(), FullSyncReport::default());
        assert_eq!(coordinator.incremental_sync().await.unwrap(), PullReport::default());

        assert!(remote.calls().is_empty());
        assert_eq!(coordinator.state(), SyncState::Idle);
        assert!(coordinator
            .store()
            .date_flag(DateFlag::LastFullSync)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_full_sync_completes_and_records_date() {
        let (coordinator, remote, _temp) = signed_in().await;
        save_local(&coordinator, days_ago(1), "up").await;
        remote.seed_mood(remote_row(days_ago(6), MoodCategory::Neutral));

        let report = coordinator.full_sync().await.unwrap();
        assert_eq!(report.push.created, 1);
        assert_eq!(report.pull.inserted, 1);
        assert!(!report.has_errors());
        assert_eq!(coordinator.state(), SyncState::Completed);
        assert!(coordinator
            .store()
            .date_flag(DateFlag::LastFullSync)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_full_sync_local_failure_sets_failed_state() {
        let (coordinator, _remote, _temp) = signed_in().await;
        coordinator.store().close().await;

        let err = coordinator.full_sync().await.unwrap_err();
        assert!(matches!(err, SyncError::Store(_)));
        assert!(matches!(coordinator.state(), SyncState::Failed(_)));
    }

    #[tokio::test]
    async fn test_remote_failure_does_not_fail_full_sync() {
        let (coordinator, remote, _temp) = signed_in().await;
        save_local(&coordinator, days_ago(1), "up").await;
        remote.set_failure(Some(RemoteError::Network("offline".into())));

        let report = coordinator.full_sync().await.unwrap();
        assert_eq!(report.push.failed, 1);
        assert_eq!(report.pull.errors.len(), 1);
        assert_eq!(coordinator.state(), SyncState::Completed);
    }

    #[tokio::test]
    async fn test_incremental_sync_records_marker() {
        let (coordinator, remote, _temp) = signed_in().await;
        remote.seed_mood(remote_row(days_ago(2), MoodCategory::Good));

        let report = coordinator.incremental_sync().await.unwrap();
        assert_eq!(report.inserted, 1);
        assert!(coordinator
            .store()
            .date_flag(DateFlag::LastIncrementalSync)
            .await
            .unwrap()
            .is_some());
        assert_eq!(coordinator.state(), SyncState::Completed);
    }

    #[tokio::test]
    async fn test_enabling_cloud_sync_pushes() {
        let (coordinator, remote, _temp) = signed_in().await;
        save_local(&coordinator, days_ago(1), "waiting").await;

        let report = coordinator.set_cloud_sync_enabled(true).await.unwrap();
        assert_eq!(report.unwrap().created, 1);
        assert!(coordinator.store().flag(Flag::CloudSyncEnabled).await.unwrap());

        let calls_before = remote.calls().len();
        assert!(coordinator.set_cloud_sync_enabled(false).await.unwrap().is_none());
        assert_eq!(remote.calls().len(), calls_before);
        assert_eq!(remote.mood_rows().len(), 1);
    }

    #[tokio::test]
    async fn test_save_mood_local_only_when_cloud_disabled() {
        let (coordinator, remote, _temp) = signed_in().await;
        let entry = MoodEntry::new(days_ago(0), MoodCategory::Good);

        let outcome = coordinator.save_mood(&entry).await.unwrap();
        assert_eq!(outcome, WriteOutcome::LocalOnly);
        assert!(remote.calls().is_empty());
        assert!(coordinator.store().mood_for_day(days_ago(0)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_mood_syncs_when_enabled() {
        let (coordinator, remote, _temp) = signed_in().await;
        enable_cloud(&coordinator).await;
        let entry = MoodEntry::new(days_ago(0), MoodCategory::Excellent);

        let outcome = coordinator.save_mood(&entry).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Synced { remote_id: entry.id });
        assert_eq!(remote.mood_insert_count(), 1);

        let status = coordinator.store().sync_status(entry.id).await.unwrap().unwrap();
        assert!(status.is_synced);
    }

    #[tokio::test]
    async fn test_save_mood_keeps_one_entry_per_day() {
        let (coordinator, remote, _temp) = signed_in().await;
        enable_cloud(&coordinator).await;
        let first = MoodEntry::new(days_ago(0), MoodCategory::Bad).with_note("first");
        let second = MoodEntry::new(days_ago(0), MoodCategory::Good).with_note("better");

        coordinator.save_mood(&first).await.unwrap();
        let outcome = coordinator.save_mood(&second).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Synced { remote_id: first.id });

        let all = coordinator.store().load_all_moods().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].note, "better");

        assert_eq!(remote.mood_rows().len(), 1);
        assert_eq!(remote.mood_insert_count(), 1);

        let today = coordinator.mood_for_day(days_ago(0)).await.unwrap().unwrap();
        assert_eq!(today.note, "better");
        assert_eq!(today.category, MoodCategory::Good);

        let listed = coordinator.list_moods(days_ago(0), days_ago(0)).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_editing_synced_mood_updates_remote_row() {
        let (coordinator, remote, _temp) = signed_in().await;
        enable_cloud(&coordinator).await;
        let entry = MoodEntry::new(days_ago(0), MoodCategory::Neutral);
        coordinator.save_mood(&entry).await.unwrap();

        let edited = entry.clone().with_note("edited");
        let outcome = coordinator.save_mood(&edited).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Synced { remote_id: entry.id });

        let status = coordinator.store().sync_status(entry.id).await.unwrap().unwrap();
        assert!(status.is_synced);
        assert_eq!(status.remote_id, Some(entry.id));

        let rows = remote.mood_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].note_text.as_deref(), Some("edited"));
        assert_eq!(remote.mood_insert_count(), 1);
        assert!(remote.calls().contains(&RemoteCall::UpdateMood(entry.id)));
    }

    #[tokio::test]
    async fn test_failed_edit_keeps_remote_id() {
        let (coordinator, remote, _temp) = signed_in().await;
        enable_cloud(&coordinator).await;
        let entry = MoodEntry::new(days_ago(0), MoodCategory::Good);
        coordinator.save_mood(&entry).await.unwrap();

        remote.set_failure(Some(RemoteError::Network("offline".into())));
        let outcome = coordinator
            .save_mood(&entry.clone().with_note("edited offline"))
            .await
            .unwrap();
        assert!(matches!(outcome, WriteOutcome::SyncPending { .. }));

        let status = coordinator.store().sync_status(entry.id).await.unwrap().unwrap();
        assert!(status.has_failed());
        assert_eq!(status.remote_id, Some(entry.id));
    }

    #[tokio::test]
    async fn test_latest_remote_row_wins_when_day_is_duplicated() {
        let (coordinator, remote, _temp) = signed_in().await;
        let day = days_ago(3);

        let mut newer = remote_row(day, MoodCategory::Good);
        newer.note_text = Some("newer".into());
        newer.updated_at = Some(Utc::now());
        let mut older = remote_row(day, MoodCategory::Bad);
        older.note_text = Some("older".into());
        older.updated_at = Some(Utc::now() - chrono::Duration::hours(2));
        remote.seed_mood(newer);
        remote.seed_mood(older);

        let report = coordinator.merge().await.unwrap();
        assert_eq!(report.remote, 1);
        let merged = coordinator.store().mood_for_day(day).await.unwrap().unwrap();
        assert_eq!(merged.note, "newer");

        enable_cloud(&coordinator).await;
        let read = coordinator.mood_for_day(day).await.unwrap().unwrap();
        assert_eq!(read.note, "newer");
        assert_eq!(coordinator.list_moods(day, day).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_mood_local_failure_skips_remote() {
        let (coordinator, remote, _temp) = signed_in().await;
        enable_cloud(&coordinator).await;
        coordinator.store().close().await;

        let entry = MoodEntry::new(days_ago(0), MoodCategory::Good);
        let err = coordinator.save_mood(&entry).await.unwrap_err();
        assert!(matches!(err, SyncError::Store(_)));
        assert!(remote.calls().is_empty());
    }

    #[tokio::test]
    async fn test_save_mood_remote_failure_is_partial_success() {
        let (coordinator, remote, _temp) = signed_in().await;
        enable_cloud(&coordinator).await;
        remote.set_failure(Some(RemoteError::Http {
            status: 503,
            message: "unavailable".into(),
        }));
        let entry = MoodEntry::new(days_ago(0), MoodCategory::Neutral);

        let outcome = coordinator.save_mood(&entry).await.unwrap();
        assert!(matches!(outcome, WriteOutcome::SyncPending { ref error } if error.contains("503")));
        assert!(coordinator.store().mood_for_day(days_ago(0)).await.unwrap().is_some());

        let status = coordinator.store().sync_status(entry.id).await.unwrap().unwrap();
        assert!(status.has_failed());
    }

    #[tokio::test]
    async fn test_reads_fall_back_to_local_on_remote_failure() {
        let (coordinator, remote, _temp) = signed_in().await;
        enable_cloud(&coordinator).await;
        for n in [1, 4, 9] {
            save_local(&coordinator, days_ago(n), "local").await;
        }
        remote.set_failure(Some(RemoteError::Network("offline".into())));

        let (from, to) = coordinator.window();
        let listed = coordinator.list_moods(from, to).await.unwrap();
        let local = coordinator.store().moods_in_range(from, to).await.unwrap();
        assert_eq!(listed, local);
        assert_eq!(listed.len(), 3);

        let single = coordinator.mood_for_day(days_ago(4)).await.unwrap();
        assert_eq!(single, coordinator.store().mood_for_day(days_ago(4)).await.unwrap());
    }

    #[tokio::test]
    async fn test_reads_prefer_remote_when_enabled() {
        let (coordinator, remote, _temp) = signed_in().await;
        enable_cloud(&coordinator).await;
        save_local(&coordinator, days_ago(1), "local").await;
        remote.seed_mood(remote_row(days_ago(1), MoodCategory::Excellent));

        let single = coordinator.mood_for_day(days_ago(1)).await.unwrap().unwrap();
        assert_eq!(single.note, "from the cloud");

        let missing_remotely = save_local(&coordinator, days_ago(2), "local only").await;
        let fallback = coordinator.mood_for_day(days_ago(2)).await.unwrap().unwrap();
        assert_eq!(fallback.id, missing_remotely.id);
    }

    #[tokio::test]
    async fn test_reads_are_local_when_signed_out() {
        let (coordinator, remote, _temp) = coordinator_with(InMemoryRemote::new()).await;
        enable_cloud(&coordinator).await;
        save_local(&coordinator, days_ago(1), "local").await;

        let (from, to) = coordinator.window();
        assert_eq!(coordinator.list_moods(from, to).await.unwrap().len(), 1);
        assert!(remote.calls().is_empty());
    }

    #[tokio::test]
    async fn test_journal_with_audio_round_trip() {
        let (coordinator, remote, temp) = signed_in().await;
        enable_cloud(&coordinator).await;
        let audio = temp.path().join("evening.m4a");
        std::fs::write(&audio, b"voice bytes").unwrap();

        let mut entry = JournalEntry::new("Talked it through").with_audio(&audio);
        let outcome = coordinator.save_journal(&entry).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Synced { remote_id: entry.id });

        let object = journal_audio_path(USER, entry.id);
        assert_eq!(
            remote.blob(JOURNAL_AUDIO_BUCKET, &object).as_deref(),
            Some(&b"voice bytes"[..])
        );
        let rows = remote.journal_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].audio_url.as_deref(), Some(object.as_str()));

        entry.content = "Talked it through, twice".into();
        coordinator.save_journal(&entry).await.unwrap();
        assert!(remote.calls().contains(&RemoteCall::UpdateJournal(entry.id)));
        assert_eq!(remote.journal_rows()[0].content, "Talked it through, twice");

        let outcome = coordinator.delete_journal(entry.id).await.unwrap();
        assert!(outcome.unwrap().is_synced());
        assert!(remote.journal_rows().is_empty());
        assert!(remote.blob(JOURNAL_AUDIO_BUCKET, &object).is_none());
        assert!(coordinator.journal(entry.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_journal_missing_recording_is_pending() {
        let (coordinator, remote, temp) = signed_in().await;
        enable_cloud(&coordinator).await;
        let entry = JournalEntry::new("").with_audio(temp.path().join("gone.m4a"));

        let outcome = coordinator.save_journal(&entry).await.unwrap();
        assert!(matches!(outcome, WriteOutcome::SyncPending { .. }));
        assert!(remote.journal_rows().is_empty());
        assert!(coordinator.journal(entry.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_unknown_journal() {
        let (coordinator, _remote, _temp) = signed_in().await;
        assert!(coordinator.delete_journal(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_journal_audio_falls_back_to_local_file() {
        let (coordinator, remote, temp) = signed_in().await;
        let audio = temp.path().join("morning.m4a");
        std::fs::write(&audio, b"local voice").unwrap();
        let entry = JournalEntry::new("").with_audio(&audio);
        coordinator.save_journal(&entry).await.unwrap();

        enable_cloud(&coordinator).await;
        remote.set_failure(Some(RemoteError::Network("offline".into())));

        let bytes = coordinator.journal_audio(entry.id).await.unwrap();
        assert_eq!(bytes.as_deref(), Some(&b"local voice"[..]));
    }

    #[tokio::test]
    async fn test_list_journals_falls_back_to_local() {
        let (coordinator, remote, _temp) = signed_in().await;
        enable_cloud(&coordinator).await;
        remote.set_failure(Some(RemoteError::Network("offline".into())));
        let entry = JournalEntry::new("offline thoughts");
        coordinator.save_journal(&entry).await.unwrap();

        let today = Utc::now().date_naive();
        let listed = coordinator
            .list_journals(days_ago(7), today.succ_opt().unwrap())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, entry.id);
    }

    #[tokio::test]
    async fn test_migration_requires_session() {
        let (coordinator, _remote, _temp) = coordinator_with(InMemoryRemote::new()).await;
        let err = coordinator.migrate_local_to_cloud().await.unwrap_err();
        assert!(matches!(err, SyncError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_migration_error_is_returned_and_flag_stays_unset() {
        let (coordinator, remote, _temp) = signed_in().await;
        save_local(&coordinator, days_ago(1), "a").await;
        remote.set_failure(Some(RemoteError::Network("offline".into())));

        let err = coordinator.migrate_local_to_cloud().await.unwrap_err();
        assert!(matches!(err, SyncError::Remote(RemoteError::Network(_))));
        assert!(!coordinator.store().flag(Flag::MigrationCompleted).await.unwrap());
    }

    #[tokio::test]
    async fn test_migration_runs_once() {
        let (coordinator, remote, _temp) = signed_in().await;
        save_local(&coordinator, days_ago(1), "a").await;
        save_local(&coordinator, days_ago(400), "old").await;

        let report = coordinator.migrate_local_to_cloud().await.unwrap();
        assert_eq!(report.created, 2);
        assert!(coordinator.store().flag(Flag::MigrationCompleted).await.unwrap());
        assert!(coordinator
            .store()
            .date_flag(DateFlag::MigrationCompleted)
            .await
            .unwrap()
            .is_some());

        let calls = remote.calls().len();
        assert_eq!(coordinator.migrate_local_to_cloud().await.unwrap(), PushReport::default());
        assert_eq!(remote.calls().len(), calls);
    }

    #[tokio::test]
    async fn test_background_sync_respects_flags_and_interval() {
        let (coordinator, _remote, _temp) = signed_in().await;
        assert!(coordinator.run_background_sync().await.unwrap().is_none());

        enable_cloud(&coordinator).await;
        coordinator.set_background_sync_enabled(true).await.unwrap();
        assert!(coordinator.run_background_sync().await.unwrap().is_some());

        // Just ran, so the interval has not elapsed.
        assert!(coordinator.run_background_sync().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_only_cloud_wins_is_implemented() {
        let (coordinator, remote, _temp) = signed_in().await;
        remote.seed_mood(remote_row(days_ago(1), MoodCategory::Good));

        let report = coordinator
            .resolve_conflicts(ConflictStrategy::CloudWins)
            .await
            .unwrap();
        assert_eq!(report.remote, 1);

        for strategy in [
            ConflictStrategy::LocalWins,
            ConflictStrategy::NewerWins,
            ConflictStrategy::Merge,
        ] {
            let err = coordinator.resolve_conflicts(strategy).await.unwrap_err();
            assert!(matches!(err, SyncError::StrategyNotImplemented(s) if s == strategy));
        }
    }

    #[tokio::test]
    async fn test_stats_and_reset() {
        let (coordinator, remote, _temp) = signed_in().await;
        save_local(&coordinator, days_ago(1), "a").await;
        save_local(&coordinator, days_ago(2), "b").await;
        coordinator
            .save_journal(&JournalEntry::new("unsynced"))
            .await
            .unwrap();
        coordinator.full_sync().await.unwrap();

        let stats = coordinator.stats().await.unwrap();
        assert_eq!(stats.moods, 2);
        assert_eq!(stats.journals, 1);
        assert_eq!(stats.synced, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.signed_in_user.as_deref(), Some(USER));
        assert_eq!(stats.state, SyncState::Completed);
        assert!(stats.last_full_sync.is_some());

        assert_eq!(coordinator.reset_sync_cache().await.unwrap(), 3);
        let stats = coordinator.stats().await.unwrap();
        assert_eq!(stats.synced, 0);
        assert_eq!(stats.pending, 3);
        assert!(stats.last_full_sync.is_none());

        let report = coordinator.push().await.unwrap();
        assert_eq!(report.skipped, 2);
        assert_eq!(remote.mood_insert_count(), 2);
    }
}
