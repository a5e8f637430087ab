//! Note Store Module
//!
//! SQLite persistence for notes. Every statement is parameterized; no value is
//! ever interpolated into SQL text.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::error::Result;
use crate::notes::expiry::format_timestamp;
use crate::notes::note::{Note, NoteRow};

/// Column list for `notes` queries.
const COLUMNS: &str = "id, content, created_at, expires_at";

// == Note Store ==
/// Handle to the `notes` table.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct NoteStore {
    pool: SqlitePool,
}

impl NoteStore {
    // == Connect ==
    /// Opens (creating if missing) the database at `database_url` and
    /// ensures the schema exists.
    ///
    /// The pool holds a single connection: SQLite has one writer anyway, and an
    /// in-memory database only lives as long as its connection.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Opens a private in-memory database.
    pub async fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:").await
    }

    // == Migrate ==
    /// Creates the `notes` table and its `expires_at` index if absent.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS notes ( \
                 id TEXT PRIMARY KEY, \
                 content TEXT NOT NULL DEFAULT '', \
                 created_at TEXT NOT NULL, \
                 expires_at TEXT NOT NULL \
             )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_notes_expires_at ON notes(expires_at)")
            .execute(&self.pool)
            .await?;

        debug!("Notes schema ready");
        Ok(())
    }

    // == Insert ==
    /// Persists a freshly minted note.
    pub async fn insert(&self, note: &Note) -> Result<()> {
        let row = NoteRow::from(note);
        sqlx::query(
            "INSERT INTO notes (id, content, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&row.id)
        .bind(&row.content)
        .bind(&row.created_at)
        .bind(&row.expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // == Fetch ==
    /// Loads a note by id regardless of its expiry state.
    pub async fn fetch(&self, id: &str) -> Result<Option<Note>> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = ?1");
        let row = sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Note::try_from).transpose()
    }

    // == Update Content ==
    /// Overwrites the content of a note that is still live at `now`.
    ///
    /// Timestamps are left untouched. Returns `None` when no live row matched.
    pub async fn update_content(
        &self,
        id: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Note>> {
        let query = format!(
            "UPDATE notes SET content = ?1 \
             WHERE id = ?2 AND expires_at >= ?3 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, NoteRow>(&query)
            .bind(content)
            .bind(id)
            .bind(format_timestamp(&now))
            .fetch_optional(&self.pool)
            .await?;

        row.map(Note::try_from).transpose()
    }

    // == Delete If Expired ==
    /// Deletes a single note only if it has expired at `now`.
    ///
    /// The expiry check and the delete are one statement, so it is safe to
    /// race with other readers and a repeated call is a no-op.
    pub async fn delete_if_expired(&self, id: &str, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?1 AND expires_at < ?2")
            .bind(id)
            .bind(format_timestamp(&now))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // == Delete Expired ==
    /// Deletes every note that has expired at `now` in one batch.
    ///
    /// Returns the number of rows removed.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM notes WHERE expires_at < ?1")
            .bind(format_timestamp(&now))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // == Count ==
    /// Returns the number of physically stored rows, expired ones included.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // == Health Check ==
    /// Verifies the database answers a trivial query.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // == Close ==
    /// Closes the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::error::NoteError;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn ttl() -> Duration {
        Duration::hours(24)
    }

    #[tokio::test]
    async fn test_store_insert_and_fetch() {
        let store = NoteStore::in_memory().await.unwrap();
        let note = Note::new(t0(), ttl()).unwrap();

        store.insert(&note).await.unwrap();
        let fetched = store.fetch(&note.id).await.unwrap();

        assert_eq!(fetched, Some(note));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_store_fetch_nonexistent() {
        let store = NoteStore::in_memory().await.unwrap();
        assert_eq!(store.fetch("zzz").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_duplicate_id_is_storage_error() {
        let store = NoteStore::in_memory().await.unwrap();
        let note = Note::new(t0(), ttl()).unwrap();

        store.insert(&note).await.unwrap();
        let result = store.insert(&note).await;
        assert!(matches!(result, Err(NoteError::Storage(_))));
    }

    #[tokio::test]
    async fn test_store_update_content_keeps_timestamps() {
        let store = NoteStore::in_memory().await.unwrap();
        let note = Note::new(t0(), ttl()).unwrap();
        store.insert(&note).await.unwrap();

        let updated = store
            .update_content(&note.id, "hello", t0() + Duration::hours(2))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.content, "hello");
        assert_eq!(updated.created_at, note.created_at);
        assert_eq!(updated.expires_at, note.expires_at);
    }

    #[tokio::test]
    async fn test_store_update_content_skips_expired_rows() {
        let store = NoteStore::in_memory().await.unwrap();
        let note = Note::new(t0(), ttl()).unwrap();
        store.insert(&note).await.unwrap();

        let result = store
            .update_content(&note.id, "late", t0() + Duration::hours(25))
            .await
            .unwrap();
        assert!(result.is_none());

        let stored = store.fetch(&note.id).await.unwrap().unwrap();
        assert_eq!(stored.content, "");
    }

    #[tokio::test]
    async fn test_store_update_content_at_exact_expiry() {
        let store = NoteStore::in_memory().await.unwrap();
        let note = Note::new(t0(), ttl()).unwrap();
        store.insert(&note).await.unwrap();

        let result = store
            .update_content(&note.id, "just in time", note.expires_at)
            .await
            .unwrap();
        assert!(result.is_some());
    }

    #[tokio::test]
    async fn test_store_delete_if_expired() {
        let store = NoteStore::in_memory().await.unwrap();
        let note = Note::new(t0(), ttl()).unwrap();
        store.insert(&note).await.unwrap();

        // Still live: nothing removed
        let removed = store.delete_if_expired(&note.id, note.expires_at).await.unwrap();
        assert_eq!(removed, 0);

        let later = t0() + Duration::hours(25);
        assert_eq!(store.delete_if_expired(&note.id, later).await.unwrap(), 1);
        assert_eq!(store.delete_if_expired(&note.id, later).await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_store_delete_expired_batch() {
        let store = NoteStore::in_memory().await.unwrap();
        let old_a = Note::new(t0(), ttl()).unwrap();
        let old_b = Note::new(t0() + Duration::minutes(5), ttl()).unwrap();
        let fresh = Note::new(t0() + Duration::hours(12), ttl()).unwrap();

        for note in [&old_a, &old_b, &fresh] {
            store.insert(note).await.unwrap();
        }

        let removed = store.delete_expired(t0() + Duration::hours(25)).await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.fetch(&fresh.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_store_content_with_quotes_is_stored_verbatim() {
        let store = NoteStore::in_memory().await.unwrap();
        let note = Note::new(t0(), ttl()).unwrap();
        store.insert(&note).await.unwrap();

        let tricky = "'); DROP TABLE notes; --";
        store
            .update_content(&note.id, tricky, t0())
            .await
            .unwrap();

        let stored = store.fetch(&note.id).await.unwrap().unwrap();
        assert_eq!(stored.content, tricky);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_store_migrate_is_idempotent() {
        let store = NoteStore::in_memory().await.unwrap();
        store.migrate().await.unwrap();
        store.health_check().await.unwrap();
    }
}
