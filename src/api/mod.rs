//! API Module
//!
//! HTTP handlers and routing for the notes server REST API.
//!
//! # Endpoints
//! - `POST /note` - Create a blank note
//! - `GET /note/:id` - Fetch a live note
//! - `PUT /note/:id` - Update a live note's content
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
