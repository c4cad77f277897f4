//! Image storage for the upload endpoint.
//! Backends: local filesystem (default) and S3/MinIO (when S3_BUCKET is set).

pub mod local;
pub mod s3;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use local::LocalImageStore;
pub use s3::S3ImageStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 error: {0}")]
    S3(String),
}

/// An uploaded image read back from storage. `content_type` is derived from
/// the stored name by [`crate::media::content_type_for`].
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Where uploaded images live. Names are produced by
/// [`crate::media::stored_image_name`] and are single path segments.
///
/// Carried in `AppState` as `Arc<dyn ImageStore>`.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn put(&self, name: &str, bytes: Bytes, content_type: &str) -> Result<(), StorageError>;

    /// `Ok(None)` when nothing is stored under `name`.
    async fn get(&self, name: &str) -> Result<Option<StoredImage>, StorageError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
