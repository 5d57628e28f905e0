//! Data models for Bookshelf

pub mod book;
pub mod payload;

// Re-export commonly used types
pub use book::{Book, BookInput};
pub use payload::BookPayload;
