use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use crate::modules::media::domain::{BlobStore, ImageUsageRepository, StoredBlob};
use crate::modules::media::infrastructure::storage::DEFAULT_CONTENT_TYPE;
use crate::shared::domain::value_objects::ImageFile;
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_info, log_warn};

/// Image upload, download and cleanup on top of a [`BlobStore`].
pub struct MediaService {
    blob_store: Arc<dyn BlobStore>,
    usage: Arc<dyn ImageUsageRepository>,
}

impl MediaService {
    pub fn new(blob_store: Arc<dyn BlobStore>, usage: Arc<dyn ImageUsageRepository>) -> Self {
        Self { blob_store, usage }
    }

    pub async fn upload(&self, content_type: Option<&str>, data: Bytes) -> AppResult<ImageFile> {
        if data.is_empty() {
            return Err(AppError::InvalidInput("Image body is empty".to_string()));
        }

        let content_type = content_type
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE);

        let image = self.blob_store.upload(content_type, data).await?;
        log_info!("Stored image {}", image.id());
        Ok(image)
    }

    pub async fn fetch(&self, image_id: Uuid) -> AppResult<StoredBlob> {
        self.blob_store.get(&ImageFile::from_id(image_id)).await
    }

    /// Best-effort removal: failures are logged, never returned.
    ///
    /// Call after the referencing rows are gone. Blobs another shop or review
    /// still points at are kept.
    pub async fn discard(&self, images: &[ImageFile]) {
        for image in images {
            match self.usage.is_in_use(image).await {
                Ok(false) => {}
                Ok(true) => {
                    log_debug!("Keeping image blob {}: still referenced", image.id());
                    continue;
                }
                Err(e) => {
                    log_warn!("Keeping image blob {}: usage check failed: {}", image.id(), e);
                    continue;
                }
            }

            match self.blob_store.delete(image).await {
                Ok(()) => log_info!("Deleted image blob {}", image.id()),
                Err(e) if e.is_not_found() => {
                    log_warn!("Image blob {} was already gone", image.id())
                }
                Err(e) => log_warn!("Failed to delete image blob {}: {}", image.id(), e),
            }
        }
    }
}
