use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::database::models::Team;
use crate::storage::{ObjectStorage, Visibility};

/// Avatar downloads must not hang a team save indefinitely.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Prefix of avatar URLs served by the product's own API.
const INTERNAL_AVATAR_PREFIX: &str = "/api/";

/// Downloads an image by URL, returning its bytes and content type.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<(Bytes, String)>;
}

pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("building avatar fetch client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<(Bytes, String)> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("fetching avatar from {}", url))?
            .error_for_status()
            .with_context(|| format!("fetching avatar from {}", url))?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let body = response
            .bytes()
            .await
            .with_context(|| format!("reading avatar body from {}", url))?;

        Ok((body, content_type))
    }
}

/// Pre-persist hook that copies third-party avatar URLs into owned storage
/// so the product does not depend on foreign URL availability.
#[derive(Clone)]
pub struct AvatarExternalizer {
    fetcher: Arc<dyn ImageFetcher>,
    storage: Arc<dyn ObjectStorage>,
}

impl AvatarExternalizer {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { fetcher, storage }
    }

    /// Rewrites `team.avatar_url` to an owned-storage URL when it points at
    /// an external resource. Best-effort: any failure is logged and the
    /// original value is kept so the surrounding save can proceed.
    pub async fn process(&self, team: &mut Team) {
        let Some(source) = team.avatar_url.clone() else {
            return;
        };
        if !self.needs_externalization(&source) {
            return;
        }

        match self.externalize(team.id, &source).await {
            Ok(stored_url) => team.avatar_url = Some(stored_url),
            Err(err) => {
                log::warn!(
                    "Failed to externalize avatar {} for team {}: {:#}",
                    source,
                    team.id,
                    err
                );
            }
        }
    }

    fn needs_externalization(&self, url: &str) -> bool {
        !url.is_empty()
            && !url.starts_with(INTERNAL_AVATAR_PREFIX)
            && !url.starts_with(self.storage.endpoint())
    }

    async fn externalize(&self, team_id: Uuid, source: &str) -> Result<String> {
        let (body, content_type) = self.fetcher.fetch(source).await?;
        let key = format!("avatars/{}/{}", team_id, Uuid::new_v4());

        self.storage
            .upload(&key, body, &content_type, Visibility::Public)
            .await
    }
}
