//! Per-message conversation orchestration for the chat assistant.

use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::SqlitePool;
use tracing::{error, warn};

use crate::extractor::extract;
use crate::matcher::ListingMatcher;
use crate::phrases;
use estately_database::{ChatMessageRepository, Listing, MessageSender};

static GREETING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(hi|hello|hey)\b").expect("valid greeting regex"));

/// Reply payload for one chat turn.
///
/// `properties` is empty on every conversational branch and on zero-result
/// searches.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatbotReply {
    pub response: String,
    pub properties: Vec<ListingSummary>,
}

impl ChatbotReply {
    fn conversational(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            properties: Vec::new(),
        }
    }
}

/// Listing projection returned alongside the reply text.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSummary {
    pub id: String,
    pub title: String,
}

/// Orchestrates one chat turn: classify the message, dispatch to the phrase
/// bank or the search path, and persist both transcript halves.
pub struct ChatbotService {
    matcher: ListingMatcher,
    transcript: ChatMessageRepository,
}

impl ChatbotService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            matcher: ListingMatcher::new(pool.clone()),
            transcript: ChatMessageRepository::new(pool),
        }
    }

    /// Handle one chat turn. Never fails: search and store errors degrade
    /// to fixed conversational replies, and transcript writes are
    /// best-effort.
    ///
    /// The user message is recorded before the reply is computed, and the
    /// bot message after, so a transcript reader always sees the turn in
    /// order.
    pub async fn respond(&self, message: &str) -> ChatbotReply {
        self.record(MessageSender::User, message).await;

        let reply = self.build_reply(message).await;

        self.record(MessageSender::Bot, &reply.response).await;
        reply
    }

    /// Classify the message and produce the reply. First matching branch
    /// wins; everything that is not a greeting or a capability question is
    /// treated as a search.
    async fn build_reply(&self, message: &str) -> ChatbotReply {
        let lowered = message.trim().to_lowercase();

        if GREETING_RE.is_match(&lowered) {
            return ChatbotReply::conversational(phrases::random_greeting());
        }
        if lowered.contains("how are you") {
            return ChatbotReply::conversational(phrases::HOW_ARE_YOU);
        }
        if lowered.contains("what can you do") {
            return ChatbotReply::conversational(phrases::CAPABILITIES);
        }

        let filter = extract(message);
        match self.matcher.find_matching(&filter).await {
            Ok(listings) if listings.is_empty() => {
                ChatbotReply::conversational(phrases::NO_RESULTS)
            }
            Ok(listings) => ChatbotReply {
                response: format_results(&listings),
                properties: listings
                    .iter()
                    .map(|listing| ListingSummary {
                        id: listing.public_id.clone(),
                        title: listing.title.clone(),
                    })
                    .collect(),
            },
            Err(cause) => {
                error!(%cause, "listing search failed during chat turn");
                ChatbotReply::conversational(phrases::SEARCH_FAILED)
            }
        }
    }

    async fn record(&self, sender: MessageSender, body: &str) {
        // Transcript writes are best-effort; the turn proceeds either way.
        if let Err(cause) = self.transcript.append(sender, body).await {
            warn!(%cause, sender = %sender, "failed to persist chat message");
        }
    }
}

fn format_results(listings: &[Listing]) -> String {
    let entries: Vec<String> = listings.iter().map(format_listing).collect();
    format!(
        "I found {} properties:\n\n{}",
        listings.len(),
        entries.join("\n")
    )
}

fn format_listing(listing: &Listing) -> String {
    let bedrooms = listing
        .bedrooms
        .map(|count| count.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let area = listing
        .area
        .map(|area| area.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let area_unit = listing.area_unit.as_deref().unwrap_or("");

    format!(
        "🏠 {} ({})\n📍 {} | ₹{}\n🛏️ {} BHK | 📏 {} {}\n",
        listing.title,
        listing.property_type,
        listing.city,
        format_price(listing.price),
        bedrooms,
        area,
        area_unit,
    )
}

/// Thousands-grouped price; two fractional digits only when the price is
/// not a whole amount.
fn format_price(price: f64) -> String {
    let cents = (price * 100.0).round() as i64;
    let whole = cents / 100;
    let fraction = (cents % 100).abs();

    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if whole < 0 {
        grouped.insert(0, '-');
    }

    if fraction == 0 {
        grouped
    } else {
        format!("{grouped}.{fraction:02}")
    }
}
