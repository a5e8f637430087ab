//! Note Cleanup Task
//!
//! Background task that periodically sweeps expired notes from storage.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::notes::NoteService;

/// Handle to a running cleanup task.
///
/// Dropping the handle leaves the task running; call [`CleanupTask::shutdown`]
/// to stop it deterministically.
#[derive(Debug)]
pub struct CleanupTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl CleanupTask {
    /// Returns a token that stops the task when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Returns true once the sweep loop has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the sweep loop and waits for it to exit.
    ///
    /// A sweep already in progress runs to completion first.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            error!(error = %e, "Note cleanup task ended abnormally");
        }
    }
}

/// Spawns a background task that sweeps expired notes.
///
/// The first sweep runs immediately, then one every `cleanup_interval`.
/// A failed sweep is logged and the loop carries on at the next tick.
///
/// # Example
/// ```ignore
/// let cleanup = spawn_cleanup_task(state.notes.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// cleanup.shutdown().await;
/// ```
pub fn spawn_cleanup_task(notes: NoteService, cleanup_interval: Duration) -> CleanupTask {
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let handle = tokio::spawn(async move {
        info!(
            interval_secs = cleanup_interval.as_secs(),
            "Starting note cleanup task"
        );

        // tokio panics on a zero period
        let period = cleanup_interval.max(Duration::from_millis(1));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    info!("Note cleanup task stopping");
                    break;
                }
                _ = interval.tick() => {
                    run_sweep(&notes).await;
                }
            }
        }
    });

    CleanupTask { cancel, handle }
}

/// Runs one sweep and logs its outcome.
async fn run_sweep(notes: &NoteService) {
    match notes.sweep().await {
        Ok(removed) if removed > 0 => {
            info!(removed, "Note cleanup: deleted expired notes");
        }
        Ok(_) => {
            debug!("Note cleanup: no expired notes found");
        }
        Err(e) => {
            error!(error = %e, "Note cleanup: sweep failed");
        }
    }
}
