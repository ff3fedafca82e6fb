//! RSVP Server
//!
//! Collects RSVP and guestbook submissions over HTTP and stores them in
//! Google Sheets, or in local JSON files when Sheets is not available.

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod storage;

use axum::{
    routing::{get, post},
    Router,
};
use rsvp_core::EntryStore;
use services::SubmissionService;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub submissions: Arc<SubmissionService>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            submissions: Arc::new(SubmissionService::new(store)),
        }
    }
}

/// Full HTTP application: API routes, optional static files, layers
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::health))
        .nest("/submissions", submission_routes());

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

fn submission_routes() -> Router<AppState> {
    Router::new()
        .route("/rsvp", post(handlers::rsvp::submit))
        .route(
            "/guestbook",
            get(handlers::guestbook::list).post(handlers::guestbook::submit),
        )
}
