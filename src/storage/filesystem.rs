use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};

use crate::storage::{ObjectStorage, Visibility};

/// Stores objects as files under a root directory, served by a static file
/// host at `endpoint`.
pub struct FilesystemStorage {
    root: PathBuf,
    endpoint: String,
}

impl FilesystemStorage {
    pub fn new(root: impl Into<PathBuf>, endpoint: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        // Keys come from our own code, but refuse traversal outside the root anyway
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            anyhow::bail!("invalid storage key: {}", key);
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStorage for FilesystemStorage {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn upload(
        &self,
        key: &str,
        body: Bytes,
        _content_type: &str,
        _visibility: Visibility,
    ) -> Result<String> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating storage directory for {}", key))?;
        }
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("writing object {}", key))?;

        Ok(format!("{}/{}", self.endpoint, key))
    }
}
