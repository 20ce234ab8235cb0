//! Repository for listing data access operations.

use crate::entities::{CreateListingRequest, Listing, ListingIntent, ListingSearchParams};
use crate::types::{ListingError, ListingResult};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;

const LISTING_COLUMNS: &str = "id, public_id, title, description, address, city, state, pincode, \
     price, property_type, phone, bedrooms, area, area_unit, listing_intent, user_id, \
     created_at, updated_at";

/// Repository for listing database operations
pub struct ListingRepository {
    pool: SqlitePool,
}

impl ListingRepository {
    /// Create a new listing repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new listing. The intent defaults to SALE when the request
    /// leaves it unset.
    pub async fn create(&self, request: &CreateListingRequest) -> ListingResult<Listing> {
        let public_id = cuid2::create_id();
        let now = chrono::Utc::now().to_rfc3339();
        let listing_intent = request.listing_intent.unwrap_or(ListingIntent::Sale);

        let result = sqlx::query(
            "INSERT INTO listings (public_id, title, description, address, city, state, pincode, \
             price, property_type, phone, bedrooms, area, area_unit, listing_intent, user_id, \
             created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.address)
        .bind(&request.city)
        .bind(&request.state)
        .bind(&request.pincode)
        .bind(request.price)
        .bind(request.property_type)
        .bind(&request.phone)
        .bind(request.bedrooms)
        .bind(request.area)
        .bind(&request.area_unit)
        .bind(listing_intent)
        .bind(&request.user_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| ListingError::DatabaseError(e.to_string()))?;

        let listing_id = result.last_insert_rowid();

        info!(
            listing_id = listing_id,
            public_id = %public_id,
            city = %request.city,
            "created new listing"
        );

        Ok(Listing {
            id: listing_id,
            public_id,
            title: request.title.clone(),
            description: request.description.clone(),
            address: request.address.clone(),
            city: request.city.clone(),
            state: request.state.clone(),
            pincode: request.pincode.clone(),
            price: request.price,
            property_type: request.property_type,
            phone: request.phone.clone(),
            bedrooms: request.bedrooms,
            area: request.area,
            area_unit: request.area_unit.clone(),
            listing_intent,
            user_id: request.user_id.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Find a listing by its public ID
    pub async fn find_by_public_id(&self, public_id: &str) -> ListingResult<Option<Listing>> {
        let sql = format!("SELECT {LISTING_COLUMNS} FROM listings WHERE public_id = ?");

        sqlx::query_as::<_, Listing>(&sql)
            .bind(public_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ListingError::DatabaseError(e.to_string()))
    }

    /// List listings newest-first with pagination
    pub async fn list_newest(&self, limit: i64, offset: i64) -> ListingResult<Vec<Listing>> {
        let sql = format!(
            "SELECT {LISTING_COLUMNS} FROM listings \
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        );

        sqlx::query_as::<_, Listing>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ListingError::DatabaseError(e.to_string()))
    }

    /// Count all listings
    pub async fn count_all(&self) -> ListingResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM listings")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ListingError::DatabaseError(e.to_string()))
    }

    /// Search listings with the multi-field filter, newest-first, paginated
    pub async fn search(
        &self,
        params: &ListingSearchParams,
        limit: i64,
        offset: i64,
    ) -> ListingResult<Vec<Listing>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE 1 = 1"
        ));
        apply_search_filters(&mut builder, params);
        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        builder
            .build_query_as::<Listing>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ListingError::DatabaseError(e.to_string()))
    }

    /// Count listings matching the multi-field filter
    pub async fn count_search(&self, params: &ListingSearchParams) -> ListingResult<i64> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM listings WHERE 1 = 1");
        apply_search_filters(&mut builder, params);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ListingError::DatabaseError(e.to_string()))
    }
}

/// Push the conjunctive WHERE predicates shared by `search` and
/// `count_search`. SQLite LIKE is case-insensitive for ASCII, which gives
/// city/state their case-insensitive substring semantics.
fn apply_search_filters(builder: &mut QueryBuilder<'_, Sqlite>, params: &ListingSearchParams) {
    if let Some(city) = &params.city {
        builder.push(" AND city LIKE ");
        builder.push_bind(format!("%{city}%"));
    }
    if let Some(state) = &params.state {
        builder.push(" AND state LIKE ");
        builder.push_bind(format!("%{state}%"));
    }
    if let Some(pincode) = &params.pincode {
        builder.push(" AND pincode = ");
        builder.push_bind(pincode.clone());
    }
    if let Some(intent) = params.listing_intent {
        builder.push(" AND listing_intent = ");
        builder.push_bind(intent);
    }
    if let Some(property_type) = params.property_type {
        builder.push(" AND property_type = ");
        builder.push_bind(property_type);
    }
    if let Some(bedrooms) = params.bedrooms {
        builder.push(" AND bedrooms = ");
        builder.push_bind(bedrooms);
    }
    if let Some(area_unit) = &params.area_unit {
        builder.push(" AND area_unit = ");
        builder.push_bind(area_unit.clone());
    }
    if let Some(min_price) = params.min_price {
        builder.push(" AND price >= ");
        builder.push_bind(min_price);
    }
    if let Some(max_price) = params.max_price {
        builder.push(" AND price <= ");
        builder.push_bind(max_price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PropertyType;
    use crate::{initialize_database, test_support};
    use estately_config::DatabaseConfig;
    use tempfile::TempDir;

    async fn create_test_repo() -> (ListingRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_listings.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let config = DatabaseConfig {
            url: db_url,
            max_connections: 1,
        };

        let pool = initialize_database(&config).await.unwrap();
        (ListingRepository::new(pool), temp_dir)
    }

    #[tokio::test]
    async fn test_create_listing() {
        let (repo, _temp_dir) = create_test_repo().await;

        let request = test_support::listing_request("Sea View Villa", "Goa", 150_000.0);
        let listing = repo.create(&request).await.unwrap();

        assert!(listing.id > 0);
        assert!(!listing.public_id.is_empty());
        assert_eq!(listing.title, "Sea View Villa");
        assert_eq!(listing.listing_intent, ListingIntent::Sale);
    }

    #[tokio::test]
    async fn test_find_by_public_id() {
        let (repo, _temp_dir) = create_test_repo().await;

        let created = repo
            .create(&test_support::listing_request("Lake House", "Udaipur", 90_000.0))
            .await
            .unwrap();

        let found = repo.find_by_public_id(&created.public_id).await.unwrap();
        assert_eq!(found, Some(created));

        let missing = repo.find_by_public_id("does-not-exist").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_newest_orders_and_paginates() {
        let (repo, _temp_dir) = create_test_repo().await;

        for i in 0..3 {
            let request =
                test_support::listing_request(&format!("Listing {i}"), "Pune", 10_000.0 + i as f64);
            repo.create(&request).await.unwrap();
        }

        let first_page = repo.list_newest(2, 0).await.unwrap();
        assert_eq!(first_page.len(), 2);
        assert_eq!(first_page[0].title, "Listing 2");
        assert_eq!(first_page[1].title, "Listing 1");

        let second_page = repo.list_newest(2, 2).await.unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].title, "Listing 0");

        assert_eq!(repo.count_all().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_search_applies_conjunctive_filters() {
        let (repo, _temp_dir) = create_test_repo().await;

        let mut villa = test_support::listing_request("Sea View Villa", "Goa", 150_000.0);
        villa.property_type = PropertyType::Villa;
        villa.listing_intent = Some(ListingIntent::Rent);
        repo.create(&villa).await.unwrap();

        let mut flat = test_support::listing_request("City Flat", "Goa", 80_000.0);
        flat.property_type = PropertyType::Apartment;
        repo.create(&flat).await.unwrap();

        let mut pricey = test_support::listing_request("Grand Villa", "Goa", 900_000.0);
        pricey.property_type = PropertyType::Villa;
        pricey.listing_intent = Some(ListingIntent::Rent);
        repo.create(&pricey).await.unwrap();

        let params = ListingSearchParams {
            city: Some("goa".to_string()),
            property_type: Some(PropertyType::Villa),
            listing_intent: Some(ListingIntent::Rent),
            max_price: Some(200_000.0),
            ..Default::default()
        };

        let results = repo.search(&params, 10, 0).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Sea View Villa");

        assert_eq!(repo.count_search(&params).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_search_price_range() {
        let (repo, _temp_dir) = create_test_repo().await;

        for (title, price) in [("Cheap", 40_000.0), ("Mid", 60_000.0), ("Expensive", 120_000.0)] {
            repo.create(&test_support::listing_request(title, "Mumbai", price))
                .await
                .unwrap();
        }

        let params = ListingSearchParams {
            min_price: Some(50_000.0),
            max_price: Some(100_000.0),
            ..Default::default()
        };

        let results = repo.search(&params, 10, 0).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Mid");
    }
}
