use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::modules::review::domain::value_objects::Rating;
use crate::shared::domain::clock;
use crate::shared::domain::value_objects::{ImageFile, UserId};
use crate::shared::errors::ValidationError;
use crate::shared::utils::collections::dedup_preserving_order;

pub const MAX_CONTENT_LENGTH: usize = 1024;
pub const MAX_IMAGES: usize = 4;

/// The author-editable part of a review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDetails {
    pub rating: Rating,
    pub content: String,
    pub images: Vec<ImageFile>,
}

impl ReviewDetails {
    pub fn rated(rating: Rating) -> Self {
        Self {
            rating,
            content: String::new(),
            images: Vec::new(),
        }
    }

    fn validated(mut self) -> Result<Self, ValidationError> {
        let length = self.content.chars().count();
        if length > MAX_CONTENT_LENGTH {
            return Err(ValidationError::ContentTooLong {
                length,
                max: MAX_CONTENT_LENGTH,
            });
        }

        self.images = dedup_preserving_order(self.images);
        if self.images.len() > MAX_IMAGES {
            return Err(ValidationError::TooManyImages {
                count: self.images.len(),
                max: MAX_IMAGES,
            });
        }
        Ok(self)
    }
}

/// Aggregate root: one user's rating of one shop, with up to four photos.
///
/// Fields are private so content length and image count can only change
/// through validating methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    id: Uuid,
    author: UserId,
    #[serde(rename = "shop")]
    shop_id: Uuid,
    rating: Rating,
    content: String,
    images: Vec<ImageFile>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(author: UserId, shop_id: Uuid, details: ReviewDetails) -> Result<Self, ValidationError> {
        let now = clock::now();
        Self::restore(Uuid::now_v7(), author, shop_id, details, now, now)
    }

    /// Rebuild a review from stored values, re-running validation.
    pub fn restore(
        id: Uuid,
        author: UserId,
        shop_id: Uuid,
        details: ReviewDetails,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let details = details.validated()?;
        Ok(Self {
            id,
            author,
            shop_id,
            rating: details.rating,
            content: details.content,
            images: details.images,
            created_at,
            updated_at,
        })
    }

    /// Replace rating, content and images. Author and shop never change.
    pub fn update(&mut self, details: ReviewDetails) -> Result<(), ValidationError> {
        let details = details.validated()?;
        self.rating = details.rating;
        self.content = details.content;
        self.images = details.images;
        self.updated_at = clock::now();
        Ok(())
    }

    pub fn is_written_by(&self, user: &UserId) -> bool {
        &self.author == user
    }

    pub fn ensure_room_for_image(&self) -> Result<(), ValidationError> {
        if self.images.len() >= MAX_IMAGES {
            return Err(ValidationError::TooManyImages {
                count: self.images.len() + 1,
                max: MAX_IMAGES,
            });
        }
        Ok(())
    }

    /// `Ok(false)` when the image was already attached.
    pub fn attach_image(&mut self, image: ImageFile) -> Result<bool, ValidationError> {
        if self.images.contains(&image) {
            return Ok(false);
        }
        self.ensure_room_for_image()?;
        self.images.push(image);
        self.updated_at = clock::now();
        Ok(true)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn author(&self) -> &UserId {
        &self.author
    }

    pub fn shop_id(&self) -> Uuid {
        self.shop_id
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn images(&self) -> &[ImageFile] {
        &self.images
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
