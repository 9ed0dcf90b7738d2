pub mod collection;
pub mod document;
pub mod team;
pub mod user;

// Re-export all repositories for easy importing
pub use collection::CollectionRepository;
pub use document::DocumentRepository;
pub use team::TeamRepository;
pub use user::UserRepository;
