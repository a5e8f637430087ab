//! API Handlers
//!
//! HTTP request handlers for each notes server endpoint.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Duration;

use crate::error::{NoteError, Result};
use crate::models::{HealthResponse, UpdateNoteRequest};
use crate::notes::{Note, NoteService, NoteStore};

/// Application state shared across all handlers.
///
/// Cloning is cheap: the service wraps a pooled store handle.
#[derive(Clone)]
pub struct AppState {
    /// Note lifecycle operations
    pub notes: NoteService,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(notes: NoteService) -> Self {
        Self { notes }
    }

    /// Creates a new AppState from configuration and an open store.
    pub fn from_config(config: &crate::config::Config, store: NoteStore) -> Self {
        let ttl = Duration::from_std(config.note_ttl()).unwrap_or_else(|_| Duration::hours(24));
        Self::new(NoteService::new(store, ttl))
    }
}

/// Handler for POST /note
///
/// Creates a blank note. No request body is read.
pub async fn create_note_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Note>)> {
    let note = state.notes.create().await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// Handler for GET /note/:id
///
/// Returns the note if it is still live.
pub async fn get_note_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>> {
    let note = state.notes.read(&id).await?;
    Ok(Json(note))
}

/// Handler for PUT /note/:id
///
/// Replaces the content of a live note. The body is validated before the
/// note is looked up.
pub async fn update_note_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Result<Json<Note>> {
    let Json(req) = payload.map_err(|rejection| {
        NoteError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;
    let content = req.into_content()?;

    let note = state.notes.update(&id, &content).await?;
    Ok(Json(note))
}

/// Handler for GET /health
///
/// Reports healthy when the note storage answers a trivial query.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.notes.store().health_check().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy())),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(HealthResponse::degraded()))
        }
    }
}
