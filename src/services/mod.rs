pub mod admin;
pub mod avatar;
pub mod bootstrap;
pub mod team;
pub mod templates;

pub use admin::AdminGovernor;
pub use avatar::{AvatarExternalizer, HttpImageFetcher, ImageFetcher};
pub use bootstrap::TeamBootstrapper;
pub use team::TeamService;
pub use templates::TemplateStore;
