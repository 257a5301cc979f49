//! Petition Storage Layer
//!
//! Implements the SubmissionStore trait using SQLite.
//!
//! # Architecture
//!
//! - SQLite for structured submission data
//! - The recent-window query returns only the fields the detector compares
//!   on, newest first, with drafts and rejected submissions excluded
//!
//! # Examples
//!
//! ```no_run
//! use petition_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for submission operations
//! ```

#![warn(missing_docs)]

use async_trait::async_trait;
use petition_domain::traits::{RecentQuery, SubmissionStore};
use petition_domain::{Submission, SubmissionId, SubmissionStatus};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Submission not found
    #[error("Submission not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of SubmissionStore
///
/// # Thread Safety
///
/// The connection is guarded by a mutex so the store can be shared across
/// concurrent duplicate checks. Queries are short; contention is not a
/// concern at intake volumes.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use petition_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("petition.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Convert SubmissionId to bytes for storage
    fn id_to_bytes(id: SubmissionId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    /// Convert bytes to SubmissionId
    fn bytes_to_id(bytes: &[u8]) -> Result<SubmissionId, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for SubmissionId, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(SubmissionId::from_value(u128::from_be_bytes(arr)))
    }

    fn row_to_submission(row: &rusqlite::Row<'_>) -> Result<Submission, rusqlite::Error> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_id(&id_bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Blob, Box::new(e))
        })?;

        let status_str: String = row.get(4)?;
        let status = SubmissionStatus::parse(&status_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(format!("Unknown status: {}", status_str))),
            )
        })?;

        Ok(Submission {
            id,
            title: row.get(1)?,
            body: row.get(2)?,
            category: row.get(3)?,
            status,
            created_at: row.get::<_, i64>(5)? as u64,
        })
    }
}

#[async_trait]
impl SubmissionStore for SqliteStore {
    type Error = StoreError;

    async fn add_submission(&self, submission: Submission) -> Result<SubmissionId, Self::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO submissions (id, title, body, category, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                Self::id_to_bytes(submission.id),
                &submission.title,
                &submission.body,
                &submission.category,
                submission.status.as_str(),
                submission.created_at as i64,
            ],
        )?;
        Ok(submission.id)
    }

    async fn get_submission(&self, id: SubmissionId) -> Result<Option<Submission>, Self::Error> {
        let conn = self.conn.lock().unwrap();
        let submission = conn
            .query_row(
                "SELECT id, title, body, category, status, created_at
                 FROM submissions WHERE id = ?1",
                params![Self::id_to_bytes(id)],
                Self::row_to_submission,
            )
            .optional()?;
        Ok(submission)
    }

    async fn find_recent(&self, query: &RecentQuery) -> Result<Vec<Submission>, Self::Error> {
        let mut sql = String::from(
            "SELECT id, title, body, category, status, created_at
             FROM submissions WHERE category = ? AND created_at >= ?",
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> =
            vec![Box::new(query.category.clone()), Box::new(query.since as i64)];

        if !query.excluded_statuses.is_empty() {
            let placeholders = vec!["?"; query.excluded_statuses.len()].join(", ");
            sql.push_str(&format!(" AND status NOT IN ({})", placeholders));
            for status in &query.excluded_statuses {
                params.push(Box::new(status.as_str()));
            }
        }

        sql.push_str(" ORDER BY created_at DESC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(limit as i64));
        }

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let submissions = stmt
            .query_map(&param_refs[..], Self::row_to_submission)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(submissions)
    }

    async fn update_status(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> Result<(), Self::Error> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE submissions SET status = ?1 WHERE id = ?2",
            params![status.as_str(), Self::id_to_bytes(id)],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(title: &str, category: &str, created_at: u64) -> Submission {
        Submission::new(title, category, format!("Body of {}", title), created_at)
    }

    #[tokio::test]
    async fn test_add_and_get_roundtrip() {
        let store = SqliteStore::new(":memory:").unwrap();
        let original = submission("Fix Elm St", "Transportation", 1000);

        let id = store.add_submission(original.clone()).await.unwrap();
        let fetched = store.get_submission(id).await.unwrap().unwrap();

        assert_eq!(fetched, original);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = SqliteStore::new(":memory:").unwrap();
        assert!(store.get_submission(SubmissionId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = SqliteStore::new(":memory:").unwrap();
        let original = submission("Fix Elm St", "Transportation", 1000);

        store.add_submission(original.clone()).await.unwrap();
        let result = store.add_submission(original).await;
        assert!(matches!(result, Err(StoreError::Database(_))));
    }

    #[tokio::test]
    async fn test_find_recent_filters_category_and_time() {
        let store = SqliteStore::new(":memory:").unwrap();
        store.add_submission(submission("In window", "Transportation", 2000)).await.unwrap();
        store.add_submission(submission("Too old", "Transportation", 500)).await.unwrap();
        store.add_submission(submission("Other category", "Parks", 2000)).await.unwrap();

        let results =
            store.find_recent(&RecentQuery::window("Transportation", 1000)).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "In window");
    }

    #[tokio::test]
    async fn test_find_recent_excludes_statuses() {
        let store = SqliteStore::new(":memory:").unwrap();
        let mut draft = submission("Draft one", "Parks", 2000);
        draft.status = SubmissionStatus::Draft;
        let mut rejected = submission("Rejected one", "Parks", 2000);
        rejected.status = SubmissionStatus::Rejected;
        store.add_submission(draft).await.unwrap();
        store.add_submission(rejected).await.unwrap();
        store.add_submission(submission("Live one", "Parks", 2000)).await.unwrap();

        let results = store.find_recent(&RecentQuery::window("Parks", 0)).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Live one");
    }

    #[tokio::test]
    async fn test_find_recent_orders_newest_first() {
        let store = SqliteStore::new(":memory:").unwrap();
        store.add_submission(submission("Oldest", "Parks", 1000)).await.unwrap();
        store.add_submission(submission("Newest", "Parks", 3000)).await.unwrap();
        store.add_submission(submission("Middle", "Parks", 2000)).await.unwrap();

        let results = store.find_recent(&RecentQuery::window("Parks", 0)).await.unwrap();

        let titles: Vec<&str> = results.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
    }

    #[tokio::test]
    async fn test_find_recent_respects_limit() {
        let store = SqliteStore::new(":memory:").unwrap();
        for i in 0..5 {
            store.add_submission(submission(&format!("Request {}", i), "Parks", 1000 + i)).await.unwrap();
        }

        let mut query = RecentQuery::window("Parks", 0);
        query.limit = Some(2);
        let results = store.find_recent(&query).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Request 4");
    }

    #[tokio::test]
    async fn test_update_status() {
        let store = SqliteStore::new(":memory:").unwrap();
        let id = store
            .add_submission(submission("Fix Elm St", "Transportation", 1000))
            .await
            .unwrap();

        store.update_status(id, SubmissionStatus::Accepted).await.unwrap();
        let fetched = store.get_submission(id).await.unwrap().unwrap();
        assert_eq!(fetched.status, SubmissionStatus::Accepted);
    }

    #[tokio::test]
    async fn test_update_status_missing_submission() {
        let store = SqliteStore::new(":memory:").unwrap();
        let result = store.update_status(SubmissionId::new(), SubmissionStatus::Accepted).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("petition.db");

        let id = {
            let store = SqliteStore::new(&path).unwrap();
            store.add_submission(submission("Fix Elm St", "Transportation", 1000)).await.unwrap()
        };

        let store = SqliteStore::new(&path).unwrap();
        let fetched = store.get_submission(id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Fix Elm St");
    }
}
