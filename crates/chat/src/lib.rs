//! # Estately Chat Crate
//!
//! The chat assistant engine for Estately. A free-text message is turned
//! into a structured listing filter by keyword/pattern matching, the filter
//! is run as a bounded search against the listing store, and the outcome is
//! rendered as a conversational reply.
//!
//! ## Architecture
//!
//! - **Extractor**: message text -> [`ListingFilter`] (pure, total)
//! - **Matcher**: [`ListingFilter`] -> bounded listing query
//! - **Phrases**: fixed phrase bank for conversational replies
//! - **Service**: per-message orchestration and transcript persistence

pub mod extractor;
pub mod matcher;
pub mod phrases;
pub mod service;

pub use extractor::{extract, ListingFilter};
pub use matcher::{ListingMatcher, RESULT_LIMIT};
pub use service::{ChatbotReply, ChatbotService, ListingSummary};
