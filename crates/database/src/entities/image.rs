//! Listing image entity definitions

use serde::{Deserialize, Serialize};

/// A stored image attached to a listing. The `url` is the public path the
/// gateway serves the file under, not a filesystem path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ListingImage {
    pub id: i64,
    pub listing_id: i64,
    pub url: String,
    pub created_at: String,
}
