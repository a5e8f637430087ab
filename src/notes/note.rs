//! Note Module
//!
//! Defines the note entity and its persisted row form.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::notes::expiry::{self, serde_timestamp};

// == Note ==
/// A single ephemeral note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Random identifier, never reused
    pub id: String,
    /// Text payload, empty at creation
    pub content: String,
    /// Creation instant
    #[serde(with = "serde_timestamp")]
    pub created_at: DateTime<Utc>,
    /// Expiration instant, always `created_at + ttl`
    #[serde(with = "serde_timestamp")]
    pub expires_at: DateTime<Utc>,
}

impl Note {
    // == Constructor ==
    /// Mints a blank note created at `now` that lives for `ttl`.
    ///
    /// Fails if the expiry falls outside the storable timestamp range.
    pub fn new(now: DateTime<Utc>, ttl: Duration) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            content: String::new(),
            created_at: now,
            expires_at: expiry::expiry_for(now, ttl)?,
        })
    }

    // == Is Expired ==
    /// Checks whether this note has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        expiry::is_expired(now, self.expires_at)
    }
}

// == Note Row ==
/// A `notes` row exactly as stored, with timestamps in canonical text form.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NoteRow {
    pub id: String,
    pub content: String,
    pub created_at: String,
    pub expires_at: String,
}

impl TryFrom<NoteRow> for Note {
    type Error = crate::error::NoteError;

    fn try_from(row: NoteRow) -> Result<Self> {
        Ok(Self {
            created_at: expiry::parse_timestamp(&row.created_at)?,
            expires_at: expiry::parse_timestamp(&row.expires_at)?,
            id: row.id,
            content: row.content,
        })
    }
}

impl From<&Note> for NoteRow {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            content: note.content.clone(),
            created_at: expiry::format_timestamp(&note.created_at),
            expires_at: expiry::format_timestamp(&note.expires_at),
        }
    }
}
