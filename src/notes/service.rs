//! Note Service Module
//!
//! Create, read, update and sweep operations, enforcing the expiry policy
//! against the note store.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use tracing::{debug, info};

use crate::error::{NoteError, Result};
use crate::notes::expiry::now_millis;
use crate::notes::note::Note;
use crate::notes::store::NoteStore;
use crate::notes::MAX_CONTENT_SIZE;

// == Note Service ==
/// Note lifecycle operations over an owned [`NoteStore`].
///
/// Each operation has an `*_at` form taking the current instant explicitly;
/// the plain form reads the wall clock. Instants are truncated to
/// milliseconds on entry so in-memory checks and SQL filters agree.
#[derive(Debug, Clone)]
pub struct NoteService {
    store: NoteStore,
    ttl: Duration,
}

impl NoteService {
    // == Constructor ==
    /// Creates a service whose notes live for `ttl`.
    pub fn new(store: NoteStore, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Returns the configured note TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Create ==
    /// Creates a blank note expiring one TTL from now.
    pub async fn create(&self) -> Result<Note> {
        self.create_at(now_millis()).await
    }

    pub async fn create_at(&self, now: DateTime<Utc>) -> Result<Note> {
        let note = Note::new(now.trunc_subsecs(3), self.ttl)?;
        self.store.insert(&note).await?;

        info!(note_id = %note.id, expires_at = %note.expires_at, "Note created");
        Ok(note)
    }

    // == Read ==
    /// Returns a live note.
    ///
    /// A note that is present but expired is deleted on the spot and reported
    /// exactly like one that never existed.
    pub async fn read(&self, id: &str) -> Result<Note> {
        self.read_at(id, now_millis()).await
    }

    pub async fn read_at(&self, id: &str, now: DateTime<Utc>) -> Result<Note> {
        self.fetch_live(id, now.trunc_subsecs(3)).await
    }

    // == Update ==
    /// Replaces the content of a live note. Timestamps never change.
    ///
    /// Content is validated before the note is looked up, so an invalid
    /// update never touches storage whatever the note's state.
    pub async fn update(&self, id: &str, content: &str) -> Result<Note> {
        self.update_at(id, content, now_millis()).await
    }

    pub async fn update_at(&self, id: &str, content: &str, now: DateTime<Utc>) -> Result<Note> {
        validate_content(content)?;

        let now = now.trunc_subsecs(3);
        self.fetch_live(id, now).await?;

        // The row can still vanish between the check and the write
        let note = self
            .store
            .update_content(id, content, now)
            .await?
            .ok_or(NoteError::NotFound)?;

        debug!(note_id = %note.id, bytes = content.len(), "Note updated");
        Ok(note)
    }

    // == Sweep ==
    /// Deletes every expired note in one batch, returning how many were removed.
    pub async fn sweep(&self) -> Result<u64> {
        self.sweep_at(now_millis()).await
    }

    pub async fn sweep_at(&self, now: DateTime<Utc>) -> Result<u64> {
        self.store.delete_expired(now.trunc_subsecs(3)).await
    }

    // == Fetch Live ==
    /// Loads a note, lazily deleting it if it has expired at `now`.
    async fn fetch_live(&self, id: &str, now: DateTime<Utc>) -> Result<Note> {
        let note = self.store.fetch(id).await?.ok_or(NoteError::NotFound)?;

        if note.is_expired(now) {
            let removed = self.store.delete_if_expired(id, now).await?;
            debug!(note_id = %id, removed, "Expired note deleted on access");
            return Err(NoteError::NotFound);
        }

        Ok(note)
    }
}

// == Validation ==
/// Rejects content the service refuses to store.
pub fn validate_content(content: &str) -> Result<()> {
    if content.len() > MAX_CONTENT_SIZE {
        return Err(NoteError::Validation(format!(
            "Content exceeds maximum size of {} bytes",
            MAX_CONTENT_SIZE
        )));
    }
    Ok(())
}
