pub mod avatars;
pub mod config;
pub mod database;
pub mod error;
pub mod services;
pub mod storage;

pub use config::Config;
pub use database::repositories::{
    CollectionRepository, DocumentRepository, TeamRepository, UserRepository,
};
pub use error::AppError;
pub use services::{AdminGovernor, AvatarExternalizer, TeamBootstrapper, TeamService};
