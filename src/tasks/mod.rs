//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Note Cleanup: Sweeps expired notes from storage at configured intervals

mod cleanup;

pub use cleanup::{spawn_cleanup_task, CleanupTask};
