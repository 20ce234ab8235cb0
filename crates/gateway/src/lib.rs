//! # Estately Gateway Crate
//!
//! This crate provides the HTTP API layer for Estately, routing REST
//! requests to the listing repositories and the chat assistant service.
//!
//! ## Architecture
//!
//! - **REST**: listing management, search, image upload, and chat endpoints
//!   with OpenAPI documentation
//! - **State**: shared application state wiring repositories and services
//! - **Error**: HTTP error mapping to a JSON error envelope

pub mod docs;
pub mod error;
pub mod rest;
pub mod state;

// Re-export main types for convenience
pub use error::{GatewayError, GatewayResult};
pub use state::AppState;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use utoipa::OpenApi;

/// Create the main application router with all routes
pub fn create_router(state: AppState) -> Router {
    let uploads_dir = state.uploads.directory.clone();
    // The multipart body carries up to max_files files plus field framing.
    let body_limit = state.uploads.max_file_size_bytes as usize
        * state.uploads.max_files_per_request as usize
        + 1024 * 1024;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .merge(rest::create_rest_routes())
        .route("/api/openapi.json", get(openapi_spec))
        .with_state(Arc::new(state))
        // Serve stored listing images statically
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
}

async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(docs::ApiDoc::openapi())
}
