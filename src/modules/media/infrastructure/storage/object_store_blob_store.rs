use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};

use crate::modules::media::domain::{BlobStore, StoredBlob};
use crate::shared::domain::value_objects::ImageFile;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::config::StorageConfig;
use crate::shared::utils::logger::LogContext;
use crate::{log_debug, log_info};

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// [`BlobStore`] over any `object_store` backend (S3, MinIO, in-memory).
pub struct ObjectStoreBlobStore {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreBlobStore {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Connect to an S3-compatible bucket described by `config`.
    pub fn s3(config: &StorageConfig) -> AppResult<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_region(&config.region)
            .with_bucket_name(&config.bucket)
            .with_virtual_hosted_style_request(
                !config.force_path_style && config.endpoint.is_none(),
            );

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            builder = builder
                .with_access_key_id(key_id)
                .with_secret_access_key(secret);
        }

        if let Some(endpoint) = &config.endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }

        let store = builder
            .build()
            .map_err(|e| AppError::ConfigError(format!("Invalid S3 configuration: {}", e)))?;

        log_info!(
            "Blob store ready: bucket '{}' in {}{}",
            config.bucket,
            config.region,
            config
                .endpoint
                .as_deref()
                .map(|e| format!(" via {}", e))
                .unwrap_or_default()
        );

        Ok(Self::new(Arc::new(store)))
    }

    fn path_for(image: &ImageFile) -> Path {
        Path::from(image.blob_key())
    }
}

#[async_trait]
impl BlobStore for ObjectStoreBlobStore {
    async fn upload(&self, content_type: &str, data: Bytes) -> AppResult<ImageFile> {
        let start = std::time::Instant::now();
        let image = ImageFile::generate();
        let path = Self::path_for(&image);
        let size = data.len();

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.store
            .put_opts(&path, PutPayload::from(data), options)
            .await
            .map_err(|e| {
                LogContext::error_with_context(&e, "Blob upload failed");
                AppError::BlobError(format!("Failed to upload {}: {}", path, e))
            })?;

        log_debug!("Uploaded {} bytes ({}) to {}", size, content_type, path);
        LogContext::blob_operation("upload", path.as_ref(), Some(start.elapsed().as_millis() as u64));
        Ok(image)
    }

    async fn delete(&self, image: &ImageFile) -> AppResult<()> {
        let path = Self::path_for(image);

        // Most backends treat deleting a missing key as success.
        self.store.head(&path).await?;
        self.store.delete(&path).await?;

        LogContext::blob_operation("delete", path.as_ref(), None);
        Ok(())
    }

    async fn get(&self, image: &ImageFile) -> AppResult<StoredBlob> {
        let path = Self::path_for(image);

        let result = self.store.get(&path).await?;
        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|value| value.to_string())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        let data = result.bytes().await?;

        Ok(StoredBlob { data, content_type })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    fn store() -> ObjectStoreBlobStore {
        ObjectStoreBlobStore::new(Arc::new(InMemory::new()))
    }

    #[tokio::test]
    async fn test_upload_then_get_returns_bytes_and_type() {
        let store = store();
        let image = store
            .upload("image/png", Bytes::from_static(b"\x89PNG..."))
            .await
            .unwrap();

        let blob = store.get(&image).await.unwrap();
        assert_eq!(blob.data, Bytes::from_static(b"\x89PNG..."));
        assert_eq!(blob.content_type, "image/png");
    }

    #[tokio::test]
    async fn test_upload_generates_distinct_ids() {
        let store = store();
        let a = store.upload("image/jpeg", Bytes::from_static(b"a")).await.unwrap();
        let b = store.upload("image/jpeg", Bytes::from_static(b"b")).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let err = store().get(&ImageFile::generate()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_removes_blob() {
        let store = store();
        let image = store.upload("image/gif", Bytes::from_static(b"gif")).await.unwrap();

        store.delete(&image).await.unwrap();
        assert!(store.get(&image).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_surfaces_error() {
        let err = store().delete(&ImageFile::generate()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_objects_are_keyed_under_images_prefix() {
        let backend = Arc::new(InMemory::new());
        let store = ObjectStoreBlobStore::new(backend.clone());
        let image = store.upload("image/png", Bytes::from_static(b"x")).await.unwrap();

        let meta = backend
            .head(&Path::from(format!("images/{}", image.id())))
            .await
            .unwrap();
        assert_eq!(meta.size, 1);
    }

    #[test]
    fn test_s3_builder_accepts_minio_style_config() {
        let config = StorageConfig {
            region: "ap-northeast-1".to_string(),
            bucket: "my-app-bucket".to_string(),
            access_key_id: Some("minio".to_string()),
            secret_access_key: Some("minio-secret".to_string()),
            endpoint: Some("http://localhost:9000".to_string()),
            force_path_style: true,
        };
        assert!(ObjectStoreBlobStore::s3(&config).is_ok());
    }
}
