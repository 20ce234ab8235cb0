//! Domain entities stored by the Estately backend

pub mod chat_message;
pub mod image;
pub mod listing;

pub use chat_message::{ChatMessage, MessageSender};
pub use image::ListingImage;
pub use listing::{
    CreateListingRequest, Listing, ListingIntent, ListingSearchParams, PropertyType,
};
