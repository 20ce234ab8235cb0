//! Shared result aliases for the database layer

pub mod errors;

pub use errors::{ChatError, DatabaseError, ListingError};

pub type DatabaseResult<T> = Result<T, DatabaseError>;
pub type ListingResult<T> = Result<T, ListingError>;
pub type ChatResult<T> = Result<T, ChatError>;
