pub mod filesystem;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

pub use filesystem::FilesystemStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// Owned blob storage with stable public-read URLs.
///
/// The production backend is [`FilesystemStorage`]; tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Public endpoint objects are served from, without a trailing slash.
    fn endpoint(&self) -> &str;

    /// Store `body` under `key` and return the URL it is reachable at.
    async fn upload(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
        visibility: Visibility,
    ) -> Result<String>;
}
