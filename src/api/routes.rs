//! API Routes
//!
//! Configures the Axum router with all notes server endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_note_handler, get_note_handler, health_handler, update_note_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /note` - Create a blank note
/// - `GET /note/:id` - Fetch a live note
/// - `PUT /note/:id` - Replace a live note's content
/// - `GET /health` - Health check endpoint
///
/// The note routes are also served under `/api`, where the web client
/// expects them.
///
/// # Middleware
/// - CORS: Allows any origin (the web client is served separately)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(note_routes())
        .nest("/api", note_routes())
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/note", post(create_note_handler))
        .route("/note/:id", get(get_note_handler).put(update_note_handler))
}
