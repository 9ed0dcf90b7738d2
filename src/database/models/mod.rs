pub mod collection;
pub mod document;
pub mod team;
pub mod user;

// Re-export all models for easy importing
pub use collection::*;
pub use document::*;
pub use team::*;
pub use user::*;
