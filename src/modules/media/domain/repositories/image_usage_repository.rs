use async_trait::async_trait;

use crate::shared::domain::value_objects::ImageFile;
use crate::shared::errors::AppResult;

/// Answers whether any persisted aggregate still points at an image.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageUsageRepository: Send + Sync {
    /// True when a shop or review row references `image`.
    async fn is_in_use(&self, image: &ImageFile) -> AppResult<bool>;
}
