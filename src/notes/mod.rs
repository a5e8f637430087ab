//! Notes Module
//!
//! Ephemeral notes backed by SQLite, with lazy deletion on access and batch
//! sweeping of expired rows.

pub mod expiry;
mod note;
mod service;
mod store;


// Re-export public types
pub use expiry::{is_expired, now_millis};
pub use note::{Note, NoteRow};
pub use service::{validate_content, NoteService};
pub use store::NoteStore;

// == Public Constants ==
/// Default note time-to-live in seconds (24 hours)
pub const DEFAULT_NOTE_TTL_SECS: u64 = 24 * 60 * 60;

/// Maximum allowed note content size in bytes
pub const MAX_CONTENT_SIZE: usize = 1024 * 1024; // 1 MB
