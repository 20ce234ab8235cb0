//! Fixed phrase bank for conversational (non-search) replies.

use rand::seq::SliceRandom;

/// Greeting replies; one is picked uniformly at random per greeting turn.
pub const GREETINGS: [&str; 3] = [
    "Hello there! 👋 I'm PropertyBot. How can I help you with properties today?",
    "Hi! 😊 Ready to find your dream property? What are you looking for?",
    "Hey! 🏡 I specialize in property searches. Try asking about 'houses for rent' or 'apartments for sale'",
];

pub const HOW_ARE_YOU: &str =
    "I'm just a bot, but I'm great at finding properties! What can I search for you?";

pub const CAPABILITIES: &str = "I can help you find properties by:\n- Location (city)\n- Price range\n- Property type\n- Number of bedrooms\n\nTry: 'Show 2BHK apartments in Mumbai under 1Cr'";

pub const NO_RESULTS: &str = "No properties found. Try different criteria like:\n'3BHK flats in Bangalore under 50k'\nor 'Villas for sale in Goa'";

pub const SEARCH_FAILED: &str =
    "Sorry, I encountered an error while searching. Please try again with different criteria.";

/// Pick a greeting uniformly at random.
pub fn random_greeting() -> &'static str {
    GREETINGS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(GREETINGS[0])
}
