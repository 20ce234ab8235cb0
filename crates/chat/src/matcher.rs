//! Translates an extracted filter into a bounded listing query.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::extractor::ListingFilter;
use estately_database::{Listing, ListingError, ListingResult};

/// Maximum number of listings one chat search returns.
pub const RESULT_LIMIT: i64 = 5;

/// Runs chat-driven searches against the listing store.
pub struct ListingMatcher {
    pool: SqlitePool,
}

impl ListingMatcher {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Execute the conjunctive query for `filter`, newest first, capped at
    /// [`RESULT_LIMIT`].
    ///
    /// Absent filter fields contribute no predicate, so an empty filter
    /// returns the newest listings rather than nothing. City is matched as
    /// a case-insensitive substring; intent and property type by equality;
    /// the price ceiling is inclusive. An empty result set is `Ok`.
    pub async fn find_matching(&self, filter: &ListingFilter) -> ListingResult<Vec<Listing>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, public_id, title, description, address, city, state, pincode, price, \
             property_type, phone, bedrooms, area, area_unit, listing_intent, user_id, \
             created_at, updated_at FROM listings WHERE 1 = 1",
        );

        if let Some(city) = &filter.city {
            builder.push(" AND city LIKE ");
            builder.push_bind(format!("%{city}%"));
        }
        if let Some(intent) = filter.intent {
            builder.push(" AND listing_intent = ");
            builder.push_bind(intent);
        }
        if let Some(max_price) = filter.max_price {
            builder.push(" AND price <= ");
            builder.push_bind(max_price);
        }
        if let Some(property_type) = filter.property_type {
            builder.push(" AND property_type = ");
            builder.push_bind(property_type);
        }

        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(RESULT_LIMIT);

        builder
            .build_query_as::<Listing>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ListingError::DatabaseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estately_config::DatabaseConfig;
    use estately_database::{
        initialize_database, CreateListingRequest, ListingIntent, ListingRepository, PropertyType,
    };
    use tempfile::TempDir;

    async fn create_test_pool() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_matcher.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let config = DatabaseConfig {
            url: db_url,
            max_connections: 1,
        };

        let pool = initialize_database(&config).await.unwrap();
        (pool, temp_dir)
    }

    fn listing_request(
        title: &str,
        city: &str,
        price: f64,
        property_type: PropertyType,
        intent: ListingIntent,
    ) -> CreateListingRequest {
        CreateListingRequest {
            title: title.to_string(),
            description: format!("{title} in {city}"),
            address: "12 Test Lane".to_string(),
            city: city.to_string(),
            state: "Test State".to_string(),
            pincode: "400001".to_string(),
            price,
            property_type,
            phone: None,
            bedrooms: Some(3),
            area: Some(2400.0),
            area_unit: Some("sq ft".to_string()),
            listing_intent: Some(intent),
            user_id: "user_1".to_string(),
        }
    }

    #[tokio::test]
    async fn empty_filter_returns_newest_listings_up_to_the_cap() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ListingRepository::new(pool.clone());

        for i in 0..7 {
            repo.create(&listing_request(
                &format!("Listing {i}"),
                "Pune",
                50_000.0,
                PropertyType::House,
                ListingIntent::Sale,
            ))
            .await
            .unwrap();
        }

        let matcher = ListingMatcher::new(pool);
        let results = matcher.find_matching(&ListingFilter::default()).await.unwrap();

        assert_eq!(results.len(), RESULT_LIMIT as usize);
        assert_eq!(results[0].title, "Listing 6");
        assert_eq!(results[4].title, "Listing 2");
    }

    #[tokio::test]
    async fn filter_fields_combine_conjunctively() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ListingRepository::new(pool.clone());

        repo.create(&listing_request(
            "Sea View Villa",
            "Goa",
            150_000.0,
            PropertyType::Villa,
            ListingIntent::Rent,
        ))
        .await
        .unwrap();
        repo.create(&listing_request(
            "Beach Villa For Sale",
            "Goa",
            150_000.0,
            PropertyType::Villa,
            ListingIntent::Sale,
        ))
        .await
        .unwrap();
        repo.create(&listing_request(
            "Goa Studio",
            "Goa",
            30_000.0,
            PropertyType::Studio,
            ListingIntent::Rent,
        ))
        .await
        .unwrap();
        repo.create(&listing_request(
            "Expensive Villa",
            "Goa",
            500_000.0,
            PropertyType::Villa,
            ListingIntent::Rent,
        ))
        .await
        .unwrap();

        let filter = ListingFilter {
            intent: Some(ListingIntent::Rent),
            city: Some("Goa".to_string()),
            max_price: Some(200_000.0),
            property_type: Some(PropertyType::Villa),
        };

        let matcher = ListingMatcher::new(pool);
        let results = matcher.find_matching(&filter).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Sea View Villa");
    }

    #[tokio::test]
    async fn city_match_is_case_insensitive_substring() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ListingRepository::new(pool.clone());

        repo.create(&listing_request(
            "Navi Flat",
            "Navi Mumbai",
            40_000.0,
            PropertyType::Apartment,
            ListingIntent::Rent,
        ))
        .await
        .unwrap();

        let filter = ListingFilter {
            city: Some("mumbai".to_string()),
            ..Default::default()
        };

        let matcher = ListingMatcher::new(pool);
        let results = matcher.find_matching(&filter).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Navi Flat");
    }

    #[tokio::test]
    async fn price_ceiling_is_inclusive() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ListingRepository::new(pool.clone());

        repo.create(&listing_request(
            "Exactly At Ceiling",
            "Pune",
            200_000.0,
            PropertyType::House,
            ListingIntent::Sale,
        ))
        .await
        .unwrap();

        let filter = ListingFilter {
            max_price: Some(200_000.0),
            ..Default::default()
        };

        let matcher = ListingMatcher::new(pool);
        let results = matcher.find_matching(&filter).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn no_match_is_ok_and_empty() {
        let (pool, _temp_dir) = create_test_pool().await;

        let filter = ListingFilter {
            city: Some("Atlantis".to_string()),
            ..Default::default()
        };

        let matcher = ListingMatcher::new(pool);
        let results = matcher.find_matching(&filter).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn missing_schema_surfaces_as_error() {
        let (pool, _temp_dir) = create_test_pool().await;
        sqlx::query("DROP TABLE listings")
            .execute(&pool)
            .await
            .unwrap();

        let matcher = ListingMatcher::new(pool);
        let result = matcher.find_matching(&ListingFilter::default()).await;
        assert!(matches!(result, Err(ListingError::DatabaseError(_))));
    }
}
