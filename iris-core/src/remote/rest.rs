//! HTTP client for the hosted backend.
//!
//! Follows the usual backend-as-a-service layout:
//! - `/auth/v1/...` for password sign-in and sign-out
//! - `/rest/v1/<table>` for rows, filtered with `eq.`/`gte.`/`lte.` operators
//! - `/storage/v1/object/<bucket>/<path>` for blobs
//!
//! Every request carries the project key in `apikey`; authenticated
//! requests add `Authorization: Bearer <access token>`.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::RemoteError;
use super::rows::{JournalEntryRow, MoodEntryRow, NewJournalEntryRow, NewMoodEntryRow};
use super::{RemoteDataService, Session};

const MOOD_ENTRIES: &str = "mood_entries";
const JOURNAL_ENTRIES: &str = "journal_entries";

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// REST implementation of [`RemoteDataService`].
#[derive(Debug)]
pub struct RestClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
    session: RwLock<Option<Session>>,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http: reqwest::Client::new(),
            session: RwLock::new(None),
        }
    }

    /// Restores a session obtained earlier, skipping sign-in.
    pub fn with_session(self, session: Session) -> Self {
        *self.session.write().unwrap_or_else(|e| e.into_inner()) = Some(session);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn table_url(&self, table: &str) -> String {
        self.build_url(&format!("/rest/v1/{}", table))
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| urlencoding::encode(s).into_owned())
            .collect();
        self.build_url(&format!(
            "/storage/v1/object/{}/{}",
            urlencoding::encode(bucket),
            encoded.join("/")
        ))
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, RemoteError> {
        let token = self
            .session()
            .map(|s| s.access_token)
            .ok_or(RemoteError::NotAuthenticated)?;
        Ok(request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", token)))
    }

    async fn check(response: Response) -> Result<Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(RemoteError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn first_row<R: DeserializeOwned>(response: Response) -> Result<R, RemoteError> {
        let mut rows: Vec<R> = response.json().await?;
        if rows.is_empty() {
            return Err(RemoteError::Decode("no row returned".to_string()));
        }
        Ok(rows.swap_remove(0))
    }

    async fn insert_row<T, R>(&self, table: &str, row: &T) -> Result<R, RemoteError>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let request = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(row);
        let response = self.authorized(request)?.send().await?;
        Self::first_row(Self::check(response).await?).await
    }

    async fn select_rows<R: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<R>, RemoteError> {
        let request = self.http.get(self.table_url(table)).query(query);
        let response = self.authorized(request)?.send().await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

#[async_trait]
impl RemoteDataService for RestClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, RemoteError> {
        let response = self
            .http
            .post(self.build_url("/auth/v1/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&PasswordGrant { email, password })
            .send()
            .await?;

        let token: TokenResponse = Self::check(response).await?.json().await?;
        let session = Session {
            user_id: token.user.id,
            email: token.user.email,
            access_token: token.access_token,
        };

        tracing::debug!(user_id = %session.user_id, "Signed in");
        *self.session.write().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), RemoteError> {
        let previous = self
            .session
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        let Some(session) = previous else {
            return Ok(());
        };

        let response = self
            .http
            .post(self.build_url("/auth/v1/logout"))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", session.access_token))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    fn current_user_id(&self) -> Option<String> {
        self.session().map(|s| s.user_id)
    }

    async fn insert_mood_entry(&self, row: &NewMoodEntryRow) -> Result<MoodEntryRow, RemoteError> {
        self.insert_row(MOOD_ENTRIES, row).await
    }

    async fn update_mood_entry(&self, row: &NewMoodEntryRow) -> Result<MoodEntryRow, RemoteError> {
        let request = self
            .http
            .patch(self.table_url(MOOD_ENTRIES))
            .query(&[("id", format!("eq.{}", row.id))])
            .header("Prefer", "return=representation")
            .json(row);
        let response = self.authorized(request)?.send().await?;
        Self::first_row(Self::check(response).await?).await
    }

    async fn fetch_mood_entries(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<MoodEntryRow>, RemoteError> {
        let query = [
            ("select", "*".to_string()),
            ("user_id", format!("eq.{}", user_id)),
            ("date", format!("gte.{}", from)),
            ("date", format!("lte.{}", to)),
            ("order", "date.desc".to_string()),
        ];
        self.select_rows(MOOD_ENTRIES, &query).await
    }

    async fn insert_journal_entry(
        &self,
        row: &NewJournalEntryRow,
    ) -> Result<JournalEntryRow, RemoteError> {
        self.insert_row(JOURNAL_ENTRIES, row).await
    }

    async fn update_journal_entry(
        &self,
        row: &NewJournalEntryRow,
    ) -> Result<JournalEntryRow, RemoteError> {
        let request = self
            .http
            .patch(self.table_url(JOURNAL_ENTRIES))
            .query(&[("id", format!("eq.{}", row.id))])
            .header("Prefer", "return=representation")
            .json(row);
        let response = self.authorized(request)?.send().await?;
        Self::first_row(Self::check(response).await?).await
    }

    async fn delete_journal_entry(&self, id: Uuid) -> Result<(), RemoteError> {
        let request = self
            .http
            .delete(self.table_url(JOURNAL_ENTRIES))
            .query(&[("id", format!("eq.{}", id))]);
        let response = self.authorized(request)?.send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn fetch_journal_entries(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<JournalEntryRow>, RemoteError> {
        let end = to + Duration::days(1);
        let query = [
            ("select", "*".to_string()),
            ("user_id", format!("eq.{}", user_id)),
            ("created_at", format!("gte.{}T00:00:00Z", from)),
            ("created_at", format!("lt.{}T00:00:00Z", end)),
            ("order", "created_at.desc".to_string()),
        ];
        self.select_rows(JOURNAL_ENTRIES, &query).await
    }

    async fn upload_blob(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, RemoteError> {
        let request = self
            .http
            .post(self.object_url(bucket, path))
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(bytes);
        let response = self.authorized(request)?.send().await?;
        Self::check(response).await?;
        Ok(path.to_string())
    }

    async fn download_blob(&self, bucket: &str, path: &str) -> Result<Vec<u8>, RemoteError> {
        let request = self.http.get(self.object_url(bucket, path));
        let response = self.authorized(request)?.send().await?;
        let bytes = Self::check(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn delete_blob(&self, bucket: &str, path: &str) -> Result<(), RemoteError> {
        let request = self.http.delete(self.object_url(bucket, path));
        let response = self.authorized(request)?.send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
