//! REST API endpoints for the gateway

pub mod chat;
pub mod health;
pub mod listings;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Create all REST API routes
pub fn create_rest_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Listing routes
        .merge(listings::create_listing_routes())
        // Chat routes
        .merge(chat::create_chat_routes())
        // Health probe
        .route("/api/health", get(health::health_check))
}
