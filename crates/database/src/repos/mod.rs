//! Repository implementations for data access

pub mod chat_message_repository;
pub mod listing_image_repository;
pub mod listing_repository;

pub use chat_message_repository::ChatMessageRepository;
pub use listing_image_repository::ListingImageRepository;
pub use listing_repository::ListingRepository;
