//! API route handlers

pub mod fund;
pub mod health;
pub mod ops;
pub mod session;

use axum::{routing::get, Router};

use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/session", session::router())
        .nest("/fund", fund::router())
        .nest("/ops", ops::router())
        .with_state(state)
}
