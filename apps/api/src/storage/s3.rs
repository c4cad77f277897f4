use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;

use crate::config::S3Settings;
use crate::media::content_type_for;
use crate::storage::{ImageStore, StorageError, StoredImage};

const KEY_PREFIX: &str = "uploads";

/// Stores images as objects under `uploads/` in one bucket.
pub struct S3ImageStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ImageStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Builds a client for MinIO (custom endpoint, path-style addressing)
    /// or AWS (default endpoint).
    pub async fn from_settings(settings: &S3Settings) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()));

        if let (Some(key_id), Some(secret)) =
            (&settings.access_key_id, &settings.secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                key_id,
                secret,
                None,
                None,
                "pocketwriter-static",
            ));
        }
        if let Some(endpoint) = &settings.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let shared = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(settings.endpoint.is_some())
            .build();

        Self::new(aws_sdk_s3::Client::from_conf(s3_config), &settings.bucket)
    }

    fn key(name: &str) -> String {
        format!("{KEY_PREFIX}/{name}")
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn put(&self, name: &str, bytes: Bytes, content_type: &str) -> Result<(), StorageError> {
        let key = Self::key(name);
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::S3(format!("upload failed: {e}")))?;

        info!("Uploaded image to s3://{}/{} ({size} bytes)", self.bucket, key);
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<StoredImage>, StorageError> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(Self::key(name))
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                let missing = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false);
                if missing {
                    return Ok(None);
                }
                return Err(StorageError::S3(format!("download failed: {e}")));
            }
        };

        // Object metadata is not trusted; the name decides the served type.
        let content_type = content_type_for(name).to_string();
        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::S3(format!("reading object body failed: {e}")))?
            .into_bytes();

        Ok(Some(StoredImage {
            bytes,
            content_type,
        }))
    }

    fn backend(&self) -> &'static str {
        "s3"
    }
}
