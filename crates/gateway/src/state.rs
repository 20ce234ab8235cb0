//! Shared application state for the gateway

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::error::{GatewayError, GatewayResult};
use estately_chat::ChatbotService;
use estately_config::{AppConfig, UploadConfig};
use estately_database::{ListingImageRepository, ListingRepository};

/// Shared application state containing all services
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub pool: SqlitePool,
    /// Upload handling settings
    pub uploads: UploadConfig,
    /// Listing repository
    pub listings: Arc<ListingRepository>,
    /// Listing image repository
    pub images: Arc<ListingImageRepository>,
    /// Chat assistant service
    pub chatbot: Arc<ChatbotService>,
}

impl AppState {
    /// Create a new application state on top of an initialized pool
    pub fn new(pool: SqlitePool, uploads: UploadConfig) -> Self {
        Self {
            listings: Arc::new(ListingRepository::new(pool.clone())),
            images: Arc::new(ListingImageRepository::new(pool.clone())),
            chatbot: Arc::new(ChatbotService::new(pool.clone())),
            pool,
            uploads,
        }
    }

    /// Create application state from configuration, initializing the
    /// database and running migrations.
    pub async fn from_config(config: &AppConfig) -> GatewayResult<Self> {
        let pool = estately_database::initialize_database(&config.database)
            .await
            .map_err(|e| {
                GatewayError::DatabaseError(format!("failed to initialize database: {e}"))
            })?;

        Ok(Self::new(pool, config.uploads.clone()))
    }
}
