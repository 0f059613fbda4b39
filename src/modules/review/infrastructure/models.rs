use crate::schema::{review_images, reviews};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::modules::review::domain::entities::{Review, ReviewDetails};
use crate::modules::review::domain::value_objects::Rating;
use crate::shared::domain::value_objects::{ImageFile, UserId};
use crate::shared::errors::{AppError, AppResult, ValidationError};

// ============= REVIEW MODELS =============

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewModel {
    pub id: Uuid,
    pub author: String,
    pub shop_id: Uuid,
    pub rating: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = reviews)]
pub struct NewReview<'a> {
    pub id: Uuid,
    pub author: &'a str,
    pub shop_id: Uuid,
    pub rating: i32,
    pub content: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Overwritten on upsert (excludes id and created_at)
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = reviews)]
pub struct ReviewChangeset<'a> {
    pub author: &'a str,
    pub shop_id: Uuid,
    pub rating: i32,
    pub content: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ============= CHILD ROWS =============

#[derive(Queryable, Selectable, Insertable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(ReviewModel, foreign_key = review_id))]
#[diesel(table_name = review_images)]
#[diesel(primary_key(review_id, image_id))]
pub struct ReviewImageRow {
    pub review_id: Uuid,
    pub image_id: Uuid,
    pub position: i32,
}

impl<'a> From<&'a Review> for NewReview<'a> {
    fn from(review: &'a Review) -> Self {
        Self {
            id: review.id(),
            author: review.author().as_str(),
            shop_id: review.shop_id(),
            rating: review.rating().value(),
            content: review.content(),
            created_at: review.created_at(),
            updated_at: review.updated_at(),
        }
    }
}

impl<'a> From<&'a Review> for ReviewChangeset<'a> {
    fn from(review: &'a Review) -> Self {
        Self {
            author: review.author().as_str(),
            shop_id: review.shop_id(),
            rating: review.rating().value(),
            content: review.content(),
            updated_at: review.updated_at(),
        }
    }
}

/// Image rows in attachment order. The entity already holds no duplicates.
pub fn image_rows(review: &Review) -> Vec<ReviewImageRow> {
    review
        .images()
        .iter()
        .zip(0..)
        .map(|(image, position)| ReviewImageRow {
            review_id: review.id(),
            image_id: image.id(),
            position,
        })
        .collect()
}

impl ReviewModel {
    /// Rebuild the aggregate from its row and its `position`-ordered image rows.
    pub fn into_entity(self, images: Vec<ReviewImageRow>) -> AppResult<Review> {
        let id = self.id;
        self.try_into_entity(images).map_err(|e| {
            AppError::ConversionError(format!("Stored review {} is invalid: {}", id, e))
        })
    }

    fn try_into_entity(self, images: Vec<ReviewImageRow>) -> Result<Review, ValidationError> {
        let details = ReviewDetails {
            rating: Rating::new(self.rating)?,
            content: self.content,
            images: images
                .into_iter()
                .map(|row| ImageFile::from_id(row.image_id))
                .collect(),
        };

        Review::restore(
            self.id,
            UserId::new(self.author)?,
            self.shop_id,
            details,
            self.created_at,
            self.updated_at,
        )
    }
}
