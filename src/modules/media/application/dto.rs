use serde::Serialize;
use uuid::Uuid;

use crate::shared::domain::value_objects::ImageFile;

/// Response body for every image upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadedImage {
    pub id: Uuid,
    pub image_url: String,
}

impl From<ImageFile> for UploadedImage {
    fn from(image: ImageFile) -> Self {
        Self {
            id: image.id(),
            image_url: image.path(),
        }
    }
}
