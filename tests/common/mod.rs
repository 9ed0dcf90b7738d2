#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::NamedTempFile;
use uuid::Uuid;

use teamspace::config::Config;
use teamspace::database::models::{CreateTeamInput, CreateUserInput, Team, User};
use teamspace::database::repositories::{TeamRepository, UserRepository};
use teamspace::services::avatar::{AvatarExternalizer, ImageFetcher};
use teamspace::services::team::TeamService;
use teamspace::storage::{ObjectStorage, Visibility};

/// Test database wrapper that provides isolated testing environment
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_file: NamedTempFile,
}

impl TestDb {
    /// Create a new test database with fresh schema
    pub async fn new() -> Result<Self> {
        let temp_file = NamedTempFile::new()?;
        let database_url = format!("sqlite:{}", temp_file.path().display());

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(TestDb {
            pool,
            _temp_file: temp_file,
        })
    }
}

pub fn test_config() -> Config {
    let mut config = Config::from_env_only().expect("Failed to build config");
    config.base_url = "https://app.example.com/".to_string();
    config.subdomains_enabled = true;
    config
}

pub async fn create_test_team(pool: &SqlitePool, name: &str) -> Team {
    TeamRepository::new(pool.clone())
        .create_team(&CreateTeamInput {
            name: name.to_string(),
            domain: None,
            avatar_url: None,
        })
        .await
        .expect("Failed to create test team")
}

pub async fn create_test_user(pool: &SqlitePool, team_id: Uuid, is_admin: bool) -> User {
    UserRepository::new(pool.clone())
        .create_user(&CreateUserInput {
            team_id,
            name: Name().fake(),
            email: SafeEmail().fake(),
            is_admin,
        })
        .await
        .expect("Failed to create test user")
}

/// In-memory object storage double.
#[derive(Default)]
pub struct MemoryStorage {
    pub objects: Mutex<Vec<(String, Bytes)>>,
}

pub const TEST_STORAGE_ENDPOINT: &str = "https://storage.example.com";

#[async_trait]
impl ObjectStorage for MemoryStorage {
    fn endpoint(&self) -> &str {
        TEST_STORAGE_ENDPOINT
    }

    async fn upload(
        &self,
        key: &str,
        body: Bytes,
        _content_type: &str,
        _visibility: Visibility,
    ) -> Result<String> {
        self.objects
            .lock()
            .unwrap()
            .push((key.to_string(), body));
        Ok(format!("{}/{}", self.endpoint(), key))
    }
}

/// Fetcher double that always returns the same image bytes.
#[derive(Default)]
pub struct StaticFetcher {
    pub calls: AtomicUsize,
}

pub const TEST_IMAGE_BYTES: &[u8] = b"not-really-a-png";

#[async_trait]
impl ImageFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str) -> Result<(Bytes, String)> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((Bytes::from_static(TEST_IMAGE_BYTES), "image/png".to_string()))
    }
}

/// Fetcher double that simulates an unreachable source.
pub struct FailingFetcher;

#[async_trait]
impl ImageFetcher for FailingFetcher {
    async fn fetch(&self, url: &str) -> Result<(Bytes, String)> {
        anyhow::bail!("connection to {} timed out", url)
    }
}

pub fn team_service(
    pool: &SqlitePool,
    fetcher: std::sync::Arc<dyn ImageFetcher>,
    storage: std::sync::Arc<dyn ObjectStorage>,
) -> TeamService {
    TeamService::new(
        TeamRepository::new(pool.clone()),
        AvatarExternalizer::new(fetcher, storage),
        test_config(),
    )
}
