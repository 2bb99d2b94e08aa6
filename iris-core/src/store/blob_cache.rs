use chrono::{NaiveDate, Utc};

use super::{LocalStore, StoreError};

fn affirmation_key(day: NaiveDate) -> String {
    format!("affirmation:{}", day)
}

impl LocalStore {
    /// The affirmation cached for `day`, if any. Unreadable content is
    /// treated as missing.
    pub async fn cached_affirmation(&self, day: NaiveDate) -> Result<Option<String>, StoreError> {
        let row: Option<(Vec<u8>,)> = sqlx::query_as("SELECT content FROM cached_blobs WHERE key = ?")
            .bind(affirmation_key(day))
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.and_then(|(bytes,)| match String::from_utf8(bytes) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(%day, error = %e, "Ignoring unreadable cached affirmation");
                None
            }
        }))
    }

    pub async fn cache_affirmation(&self, day: NaiveDate, text: &str) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO cached_blobs (key, content, cached_at) VALUES (?, ?, ?) \
             ON CONFLICT(key) DO UPDATE SET content = excluded.content, cached_at = excluded.cached_at",
        )
        .bind(affirmation_key(day))
        .bind(text.as_bytes())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::temp_store;

    #[tokio::test]
    async fn test_affirmation_is_cached_per_day() {
        let (store, _temp) = temp_store().await;
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();

        assert!(store.cached_affirmation(monday).await.unwrap().is_none());

        store.cache_affirmation(monday, "You are enough.").await.unwrap();
        store.cache_affirmation(monday, "Breathe in, breathe out.").await.unwrap();

        assert_eq!(
            store.cached_affirmation(monday).await.unwrap().as_deref(),
            Some("Breathe in, breathe out.")
        );
        assert!(store.cached_affirmation(tuesday).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_utf8_reads_as_missing() {
        let (store, _temp) = temp_store().await;
        let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        sqlx::query("INSERT INTO cached_blobs (key, content, cached_at) VALUES (?, ?, ?)")
            .bind(affirmation_key(day))
            .bind(vec![0xff_u8, 0xfe])
            .bind("2025-06-02T00:00:00+00:00")
            .execute(store.pool())
            .await
            .unwrap();

        assert!(store.cached_affirmation(day).await.unwrap().is_none());
    }
}
