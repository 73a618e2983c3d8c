//! Local filesystem blob storage.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::provider::BlobStorage;

const PROVIDER_ID: &str = "local_fs";

pub struct LocalFsBlobStorage {
    root: PathBuf,
}

impl LocalFsBlobStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Keys are relative paths; anything escaping the root is rejected.
    fn path_for(&self, key: &str) -> Result<PathBuf, ProviderError> {
        let relative = Path::new(key);
        let safe = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(ProviderError::Rejected {
                provider: PROVIDER_ID.to_string(),
                status: 400,
                message: format!("Invalid blob key: {}", key),
            });
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStorage for LocalFsBlobStorage {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), ProviderError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ProviderError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFsBlobStorage::new(dir.path());

        storage
            .put("listings/tmp-1/photo.jpg", b"jpeg".to_vec())
            .await
            .unwrap();

        let bytes = storage.get("listings/tmp-1/photo.jpg").await.unwrap();
        assert_eq!(bytes.as_deref(), Some(&b"jpeg"[..]));
        assert!(storage.get("listings/missing.jpg").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFsBlobStorage::new(dir.path());

        let result = storage.put("../outside", b"x".to_vec()).await;
        assert!(matches!(result, Err(ProviderError::Rejected { .. })));
    }
}
