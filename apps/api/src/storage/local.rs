use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use crate::media::content_type_for;
use crate::storage::{ImageStore, StorageError, StoredImage};

/// Stores images as plain files under one directory, created on first write.
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn put(&self, name: &str, bytes: Bytes, _content_type: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(name);
        tokio::fs::write(&path, &bytes).await?;
        info!("Stored image {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<StoredImage>, StorageError> {
        match tokio::fs::read(self.root.join(name)).await {
            Ok(data) => Ok(Some(StoredImage {
                bytes: Bytes::from(data),
                content_type: content_type_for(name).to_string(),
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path().join("uploads"));

        store
            .put("1_cat.png", Bytes::from_static(b"\x89PNG"), "image/png")
            .await
            .unwrap();

        let image = store.get("1_cat.png").await.unwrap().unwrap();
        assert_eq!(&image.bytes[..], b"\x89PNG");
        assert_eq!(image.content_type, "image/png");
        assert!(dir.path().join("uploads/1_cat.png").exists());
    }

    #[tokio::test]
    async fn test_missing_image_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path());
        assert!(store.get("nope.jpg").await.unwrap().is_none());
    }
}
