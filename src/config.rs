use anyhow::Result;
use std::env;

/// Subdomains that can never be claimed by a team because the product itself
/// routes on them.
pub const DEFAULT_RESERVED_SUBDOMAINS: &[&str] = &[
    "about", "account", "admin", "api", "app", "assets", "beta", "billing", "blog", "cdn",
    "community", "dashboard", "developers", "docs", "forum", "help", "localhost", "login",
    "logout", "mail", "new", "news", "oauth", "search", "secure", "settings", "signup", "staging",
    "static", "status", "store", "support", "test", "www",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Public base URL of the product, e.g. `https://app.example.com`.
    pub base_url: String,
    /// Whether teams are reachable on `{subdomain}.{base-host}`.
    pub subdomains_enabled: bool,
    pub reserved_subdomains: Vec<String>,
    /// Root directory of the filesystem object store.
    pub file_storage_root: String,
    /// Public endpoint files uploaded to the object store are served from.
    pub file_storage_url: String,
    /// Directory containing the onboarding document templates.
    pub onboarding_template_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_env_only()
    }

    /// Load configuration from environment variables only (without loading .env files)
    /// This is useful for testing where you want to control the environment directly
    pub fn from_env_only() -> Result<Self> {
        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:teamspace.db".to_string()),
            base_url: env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            subdomains_enabled: env::var("SUBDOMAINS_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            reserved_subdomains: DEFAULT_RESERVED_SUBDOMAINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            file_storage_root: env::var("FILE_STORAGE_ROOT")
                .unwrap_or_else(|_| "./storage".to_string()),
            file_storage_url: env::var("FILE_STORAGE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/storage".to_string()),
            onboarding_template_dir: env::var("ONBOARDING_TEMPLATE_DIR")
                .unwrap_or_else(|_| "./templates/onboarding".to_string()),
        })
    }

    pub fn is_reserved_subdomain(&self, candidate: &str) -> bool {
        self.reserved_subdomains.iter().any(|s| s == candidate)
    }
}
