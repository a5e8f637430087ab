//! iThinkNote - A minimal ephemeral note-sharing server
//!
//! Notes are created blank, edited while live, and self-destruct a fixed TTL
//! after creation. Expired notes are deleted lazily on access and swept from
//! storage by a background task.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod notes;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{NoteError, Result};
pub use notes::{Note, NoteService, NoteStore};
pub use tasks::{spawn_cleanup_task, CleanupTask};
