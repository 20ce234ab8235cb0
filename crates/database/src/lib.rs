//! Estately Database Crate
//!
//! This crate provides database functionality for the Estately listing
//! backend, including connection management, migrations, and repository
//! implementations for listings, listing images, and the chat transcript.

use estately_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

// Re-export repositories
pub use repos::{ChatMessageRepository, ListingImageRepository, ListingRepository};

// Re-export entities
pub use entities::{
    chat_message::{ChatMessage, MessageSender},
    image::ListingImage,
    listing::{CreateListingRequest, Listing, ListingIntent, ListingSearchParams, PropertyType},
};

// Re-export types
pub use types::{
    errors::{ChatError, DatabaseError, ListingError},
    ChatResult, DatabaseResult, ListingResult,
};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    Ok(pool)
}
