//! Repository for listing image records.

use crate::entities::ListingImage;
use crate::types::{ListingError, ListingResult};
use sqlx::SqlitePool;
use tracing::info;

/// Repository for listing image database operations
pub struct ListingImageRepository {
    pool: SqlitePool,
}

impl ListingImageRepository {
    /// Create a new listing image repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record one stored image for a listing
    pub async fn create(&self, listing_id: i64, url: &str) -> ListingResult<ListingImage> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO listing_images (listing_id, url, created_at) VALUES (?, ?, ?)",
        )
        .bind(listing_id)
        .bind(url)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| ListingError::DatabaseError(e.to_string()))?;

        let image_id = result.last_insert_rowid();

        info!(
            image_id = image_id,
            listing_id = listing_id,
            url = url,
            "recorded listing image"
        );

        Ok(ListingImage {
            id: image_id,
            listing_id,
            url: url.to_string(),
            created_at: now,
        })
    }

    /// Fetch all images for a listing, oldest first
    pub async fn find_by_listing_id(&self, listing_id: i64) -> ListingResult<Vec<ListingImage>> {
        sqlx::query_as::<_, ListingImage>(
            "SELECT id, listing_id, url, created_at FROM listing_images \
             WHERE listing_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(listing_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ListingError::DatabaseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::ListingRepository;
    use crate::{initialize_database, test_support};
    use estately_config::DatabaseConfig;
    use tempfile::TempDir;

    async fn create_test_repos() -> (ListingRepository, ListingImageRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_images.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let config = DatabaseConfig {
            url: db_url,
            max_connections: 1,
        };

        let pool = initialize_database(&config).await.unwrap();
        (
            ListingRepository::new(pool.clone()),
            ListingImageRepository::new(pool),
            temp_dir,
        )
    }

    #[tokio::test]
    async fn test_create_and_list_images() {
        let (listings, images, _temp_dir) = create_test_repos().await;

        let listing = listings
            .create(&test_support::listing_request("Garden Home", "Pune", 75_000.0))
            .await
            .unwrap();

        images
            .create(listing.id, "/uploads/a.jpg")
            .await
            .unwrap();
        images
            .create(listing.id, "/uploads/b.jpg")
            .await
            .unwrap();

        let stored = images.find_by_listing_id(listing.id).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].url, "/uploads/a.jpg");
        assert_eq!(stored[1].url, "/uploads/b.jpg");
    }

    #[tokio::test]
    async fn test_images_for_unknown_listing_are_empty() {
        let (_listings, images, _temp_dir) = create_test_repos().await;

        let stored = images.find_by_listing_id(999).await.unwrap();
        assert!(stored.is_empty());
    }
}
