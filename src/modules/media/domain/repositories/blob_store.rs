use async_trait::async_trait;
use bytes::Bytes;

use crate::shared::domain::value_objects::ImageFile;
use crate::shared::errors::AppResult;

/// Bytes and content type of a stored image.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredBlob {
    pub data: Bytes,
    pub content_type: String,
}

/// Key-addressed image storage. Calls are independent and never transactional.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under a freshly generated image id.
    async fn upload(&self, content_type: &str, data: Bytes) -> AppResult<ImageFile>;

    /// Fails with `NotFound` when nothing is stored for the image.
    async fn delete(&self, image: &ImageFile) -> AppResult<()>;

    /// Fails with `NotFound` when nothing is stored for the image.
    async fn get(&self, image: &ImageFile) -> AppResult<StoredBlob>;
}
