//! Listing entity definitions

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub public_id: String,
    pub title: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub price: f64,
    pub property_type: PropertyType,
    pub phone: Option<String>,
    pub bedrooms: Option<i64>,
    pub area: Option<f64>,
    pub area_unit: Option<String>,
    pub listing_intent: ListingIntent,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListingRequest {
    pub title: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub price: f64,
    pub property_type: PropertyType,
    pub phone: Option<String>,
    pub bedrooms: Option<i64>,
    pub area: Option<f64>,
    pub area_unit: Option<String>,
    pub listing_intent: Option<ListingIntent>,
    pub user_id: String,
}

/// Multi-field filter for the listing search endpoint. Every field is
/// optional; absent fields contribute no predicate.
#[derive(Debug, Clone, Default)]
pub struct ListingSearchParams {
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub listing_intent: Option<ListingIntent>,
    pub property_type: Option<PropertyType>,
    pub bedrooms: Option<i64>,
    pub area_unit: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyType {
    House,
    Villa,
    Apartment,
    Studio,
    Plot,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "HOUSE",
            PropertyType::Villa => "VILLA",
            PropertyType::Apartment => "APARTMENT",
            PropertyType::Studio => "STUDIO",
            PropertyType::Plot => "PLOT",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a listing is offered for rent or for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ListingIntent {
    Rent,
    Sale,
}

impl ListingIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingIntent::Rent => "RENT",
            ListingIntent::Sale => "SALE",
        }
    }
}

impl std::fmt::Display for ListingIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
