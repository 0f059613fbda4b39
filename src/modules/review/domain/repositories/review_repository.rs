use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::review::domain::entities::Review;
use crate::shared::application::PageRequest;
use crate::shared::domain::value_objects::UserId;
use crate::shared::errors::AppResult;

/// Filters for [`ReviewRepository::find_recent_reviews`]. `None` means unfiltered;
/// both time bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewQuery {
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
    pub shop_id: Option<Uuid>,
    pub author: Option<UserId>,
    pub page: PageRequest,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Upsert the review row and replace its image rows in one transaction.
    async fn save(&self, review: &Review) -> AppResult<()>;

    /// Fails with `NotFound` when no review has this id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Review>;

    async fn find_all(&self) -> AppResult<Vec<Review>>;

    async fn find_all_with_limit(&self, page: PageRequest) -> AppResult<Vec<Review>>;

    /// Newest first (`created_at`, then `id`, both descending).
    async fn find_recent_reviews(&self, query: ReviewQuery) -> AppResult<Vec<Review>>;

    /// Removes the image rows and then the review. `NotFound` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}
