//! Object storage behind an async trait.
//!
//! The handler layer validates size and content type (see
//! `reelhouse_core::upload`) before anything reaches a store, so
//! implementations only move bytes. [`LocalDiskStore`] writes under a root
//! directory that the server serves statically; an S3-style backend would
//! implement the same trait.

use std::path::PathBuf;

use async_trait::async_trait;

use reelhouse_core::upload::UploadBucket;

/// Storage backend failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write-only object store for uploaded media.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Persist `bytes` under `bucket`/`key` and return the public URL.
    async fn put(
        &self,
        bucket: UploadBucket,
        key: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError>;
}

/// Stores objects on the local filesystem under `root/<bucket>/<key>`.
pub struct LocalDiskStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalDiskStore {
    pub fn new(root: PathBuf, public_base_url: impl Into<String>) -> Self {
        Self {
            root,
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for LocalDiskStore {
    async fn put(
        &self,
        bucket: UploadBucket,
        key: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        let path = self.root.join(bucket.name()).join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "object stored");
        Ok(format!(
            "{}/{}/{key}",
            self.public_base_url.trim_end_matches('/'),
            bucket.name()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("reelhouse-store-{name}-{}", std::process::id()))
    }

    #[tokio::test]
    async fn put_writes_the_object_and_returns_its_public_url() {
        let root = scratch_dir("put");
        let store = LocalDiskStore::new(root.clone(), "http://localhost:3000/media/");

        let url = store
            .put(UploadBucket::Posters, "7/1700000000000.png", b"png-bytes")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:3000/media/posters/7/1700000000000.png");

        let written = tokio::fs::read(root.join("posters/7/1700000000000.png"))
            .await
            .unwrap();
        assert_eq!(written, b"png-bytes");

        tokio::fs::remove_dir_all(root).await.unwrap();
    }
}
