//! Keyword-driven filter extraction from free-text chat messages.

use estately_database::{ListingIntent, PropertyType};
use once_cell::sync::Lazy;
use regex::Regex;

// The captured city keeps the casing the user typed; matching against the
// store is case-insensitive anyway.
static CITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)in ([a-zA-Z]+)").expect("valid city regex"));

// Bounded digit run: price mentions outside the 4-7 digit window are
// ignored entirely rather than partially captured.
static PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"under (\d{4,7})\b").expect("valid price regex"));

static TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"house|villa|apartment|studio|plot").expect("valid type regex"));

/// Partial search constraint derived from one chat message.
///
/// Every field is independently optional; `None` means "unconstrained",
/// never a wildcard value. A fully-empty filter matches the unconstrained
/// newest-first query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub intent: Option<ListingIntent>,
    pub city: Option<String>,
    pub max_price: Option<f64>,
    pub property_type: Option<PropertyType>,
}

/// Extract a [`ListingFilter`] from a free-text message.
///
/// Pure and total: unrecognized input yields absent fields, never an error.
/// All four rules run against the full message; when both a rent keyword
/// and a sale keyword appear, the sale rule wins because it is evaluated
/// last.
///
/// Known limitation, kept on purpose: only a single alphabetic token after
/// `in ` is captured, so multi-word cities ("New York") come out truncated.
pub fn extract(message: &str) -> ListingFilter {
    let msg = message.to_lowercase();
    let mut filter = ListingFilter::default();

    if msg.contains("rent") {
        filter.intent = Some(ListingIntent::Rent);
    }
    if msg.contains("buy") || msg.contains("sale") || msg.contains("sell") {
        filter.intent = Some(ListingIntent::Sale);
    }

    if let Some(captures) = CITY_RE.captures(message) {
        filter.city = Some(captures[1].to_string());
    }

    if let Some(captures) = PRICE_RE.captures(&msg) {
        if let Ok(price) = captures[1].parse::<f64>() {
            filter.max_price = Some(price);
        }
    }

    if let Some(found) = TYPE_RE.find(&msg) {
        filter.property_type = Some(match found.as_str() {
            "house" => PropertyType::House,
            "villa" => PropertyType::Villa,
            "apartment" => PropertyType::Apartment,
            "studio" => PropertyType::Studio,
            _ => PropertyType::Plot,
        });
    }

    filter
}
