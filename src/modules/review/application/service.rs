use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use crate::modules::media::application::MediaService;
use crate::modules::review::application::dto::ReviewInput;
use crate::modules::review::domain::entities::Review;
use crate::modules::review::domain::repositories::{ReviewQuery, ReviewRepository};
use crate::modules::shop::domain::repositories::ShopRepository;
use crate::shared::domain::value_objects::{ImageFile, UserId};
use crate::shared::errors::{AppError, AppResult};
use crate::{log_info, log_warn};

pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    shops: Arc<dyn ShopRepository>,
    media: Arc<MediaService>,
}

impl ReviewService {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        shops: Arc<dyn ShopRepository>,
        media: Arc<MediaService>,
    ) -> Self {
        Self {
            reviews,
            shops,
            media,
        }
    }

    /// The reviewed shop must exist.
    pub async fn create(&self, input: ReviewInput, author: UserId) -> AppResult<Review> {
        let shop_id = input
            .shop_id()?
            .ok_or_else(|| AppError::InvalidInput("Review must name a shop".to_string()))?;
        let details = input.into_details()?;

        self.shops.find_by_id(shop_id).await?;

        let review = Review::new(author, shop_id, details)?;
        self.reviews.save(&review).await?;

        log_info!(
            "Review {} of shop {} posted by {}",
            review.id(),
            shop_id,
            review.author()
        );
        Ok(review)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Review> {
        self.reviews.find_by_id(id).await
    }

    pub async fn recent(&self, query: ReviewQuery) -> AppResult<Vec<Review>> {
        self.reviews.find_recent_reviews(query).await
    }

    pub async fn update(&self, id: Uuid, input: ReviewInput, user: &UserId) -> AppResult<Review> {
        let shop_id = input.shop_id()?;
        let details = input.into_details()?;
        let mut review = self.authored_review(id, user).await?;

        if shop_id.is_some_and(|shop_id| shop_id != review.shop_id()) {
            return Err(AppError::InvalidInput(format!(
                "Review {} cannot be moved to another shop",
                id
            )));
        }

        let before = review.images().to_vec();
        review.update(details)?;
        self.reviews.save(&review).await?;

        let dropped: Vec<ImageFile> = before
            .into_iter()
            .filter(|image| !review.images().contains(image))
            .collect();
        self.media.discard(&dropped).await;

        Ok(review)
    }

    pub async fn delete(&self, id: Uuid, user: &UserId) -> AppResult<()> {
        let review = self.authored_review(id, user).await?;
        self.reviews.delete(id).await?;

        log_info!("Review {} deleted by {}", id, user);
        self.media.discard(review.images()).await;
        Ok(())
    }

    /// The image limit is checked before anything is uploaded.
    pub async fn add_image(
        &self,
        id: Uuid,
        content_type: Option<&str>,
        data: Bytes,
        user: &UserId,
    ) -> AppResult<ImageFile> {
        let mut review = self.authored_review(id, user).await?;
        review.ensure_room_for_image()?;

        let image = self.media.upload(content_type, data).await?;

        let saved = match review.attach_image(image) {
            Ok(_) => self.reviews.save(&review).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = saved {
            log_warn!("Attaching image {} to review {} failed: {}", image.id(), id, e);
            self.media.discard(&[image]).await;
            return Err(e);
        }

        Ok(image)
    }

    async fn authored_review(&self, id: Uuid, user: &UserId) -> AppResult<Review> {
        let review = self.reviews.find_by_id(id).await?;
        if !review.is_written_by(user) {
            return Err(AppError::Forbidden(format!(
                "Review {} can only be changed by its author",
                id
            )));
        }
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::media::domain::repositories::{MockBlobStore, MockImageUsageRepository};
    use crate::modules::review::domain::entities::{ReviewDetails, MAX_IMAGES};
    use crate::modules::review::domain::repositories::MockReviewRepository;
    use crate::modules::review::domain::value_objects::Rating;
    use crate::modules::shop::domain::entities::{Shop, ShopDetails};
    use crate::modules::shop::domain::repositories::MockShopRepository;
    use crate::modules::shop::domain::value_objects::ShopName;
    use crate::shared::errors::ValidationError;
    use mockall::predicate::eq;

    fn alice() -> UserId {
        UserId::new("alice").unwrap()
    }

    fn review_by(author: UserId, images: Vec<ImageFile>) -> Review {
        let details = ReviewDetails {
            rating: Rating::new(2).unwrap(),
            content: "fine".to_string(),
            images,
        };
        Review::new(author, Uuid::now_v7(), details).unwrap()
    }

    fn unused_images() -> MockImageUsageRepository {
        let mut usage = MockImageUsageRepository::new();
        usage.expect_is_in_use().returning(|_| Ok(false));
        usage
    }

    fn input(shop: Option<Uuid>, rating: i32) -> ReviewInput {
        ReviewInput {
            shop: shop.map(|id| id.to_string()),
            rating,
            content: "Great".to_string(),
            images: Vec::new(),
        }
    }

    struct Mocks {
        reviews: MockReviewRepository,
        shops: MockShopRepository,
        blobs: MockBlobStore,
        usage: MockImageUsageRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                reviews: MockReviewRepository::new(),
                shops: MockShopRepository::new(),
                blobs: MockBlobStore::new(),
                usage: unused_images(),
            }
        }

        fn service(self) -> ReviewService {
            ReviewService::new(
                Arc::new(self.reviews),
                Arc::new(self.shops),
                Arc::new(MediaService::new(Arc::new(self.blobs), Arc::new(self.usage))),
            )
        }
    }

    #[tokio::test]
    async fn test_create_checks_shop_then_saves() {
        let shop = Shop::new(
            ShopDetails::named(ShopName::new("Cafe A").unwrap()),
            UserId::new("owner").unwrap(),
        );
        let shop_id = shop.id;

        let mut mocks = Mocks::new();
        mocks
            .shops
            .expect_find_by_id()
            .with(eq(shop_id))
            .times(1)
            .returning(move |_| Ok(shop.clone()));
        mocks
            .reviews
            .expect_save()
            .withf(move |review| review.shop_id() == shop_id && review.author().as_str() == "alice")
            .times(1)
            .returning(|_| Ok(()));

        let review = mocks
            .service()
            .create(input(Some(shop_id), 3), alice())
            .await
            .unwrap();
        assert_eq!(review.rating().value(), 3);
    }

    #[tokio::test]
    async fn test_create_for_missing_shop_is_not_found() {
        let mut mocks = Mocks::new();
        mocks
            .shops
            .expect_find_by_id()
            .returning(|id| Err(AppError::NotFound(format!("Shop {} not found", id))));
        mocks.reviews.expect_save().never();

        let err = mocks
            .service()
            .create(input(Some(Uuid::now_v7()), 1), alice())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_requires_shop() {
        let err = Mocks::new()
            .service()
            .create(input(None, 1), alice())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_update_by_other_user_is_forbidden() {
        let review = review_by(UserId::new("bob").unwrap(), Vec::new());
        let id = review.id();

        let mut mocks = Mocks::new();
        mocks
            .reviews
            .expect_find_by_id()
            .returning(move |_| Ok(review.clone()));
        mocks.reviews.expect_save().never();

        let err = mocks
            .service()
            .update(id, input(None, 0), &alice())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_update_cannot_move_review() {
        let review = review_by(alice(), Vec::new());
        let id = review.id();

        let mut mocks = Mocks::new();
        mocks
            .reviews
            .expect_find_by_id()
            .returning(move |_| Ok(review.clone()));
        mocks.reviews.expect_save().never();

        let err = mocks
            .service()
            .update(id, input(Some(Uuid::now_v7()), 1), &alice())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_update_discards_dropped_images() {
        let dropped = ImageFile::generate();
        let review = review_by(alice(), vec![dropped]);
        let id = review.id();

        let mut mocks = Mocks::new();
        mocks
            .reviews
            .expect_find_by_id()
            .returning(move |_| Ok(review.clone()));
        mocks
            .reviews
            .expect_save()
            .withf(|review| review.images().is_empty() && review.rating().value() == 0)
            .returning(|_| Ok(()));
        mocks
            .blobs
            .expect_delete()
            .with(eq(dropped))
            .times(1)
            .returning(|_| Ok(()));

        let updated = mocks
            .service()
            .update(id, input(None, 0), &alice())
            .await
            .unwrap();
        assert!(updated.images().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_images_after_rows() {
        let images = vec![ImageFile::generate(), ImageFile::generate()];
        let review = review_by(alice(), images);
        let id = review.id();

        let mut seq = mockall::Sequence::new();
        let mut mocks = Mocks::new();
        mocks
            .reviews
            .expect_find_by_id()
            .returning(move |_| Ok(review.clone()));
        mocks
            .reviews
            .expect_delete()
            .with(eq(id))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        mocks
            .blobs
            .expect_delete()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        mocks.service().delete(id, &alice()).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_image_over_limit_uploads_nothing() {
        let full: Vec<ImageFile> = (0..MAX_IMAGES).map(|_| ImageFile::generate()).collect();
        let review = review_by(alice(), full);
        let id = review.id();

        let mut mocks = Mocks::new();
        mocks
            .reviews
            .expect_find_by_id()
            .returning(move |_| Ok(review.clone()));
        mocks.blobs.expect_upload().never();
        mocks.reviews.expect_save().never();

        let err = mocks
            .service()
            .add_image(id, Some("image/png"), Bytes::from_static(b"png"), &alice())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::ValidationError(ValidationError::TooManyImages { count: 5, max: 4 })
        ));
    }

    #[tokio::test]
    async fn test_add_image_rolls_back_blob_when_save_fails() {
        let review = review_by(alice(), Vec::new());
        let id = review.id();
        let image = ImageFile::generate();

        let mut mocks = Mocks::new();
        mocks
            .reviews
            .expect_find_by_id()
            .returning(move |_| Ok(review.clone()));
        mocks
            .reviews
            .expect_save()
            .returning(|_| Err(AppError::DatabaseError("deadlock detected".to_string())));
        mocks.blobs.expect_upload().returning(move |_, _| Ok(image));
        mocks
            .blobs
            .expect_delete()
            .with(eq(image))
            .times(1)
            .returning(|_| Ok(()));

        let err = mocks
            .service()
            .add_image(id, None, Bytes::from_static(b"raw"), &alice())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_add_image_by_author() {
        let review = review_by(alice(), Vec::new());
        let id = review.id();
        let image = ImageFile::generate();

        let mut mocks = Mocks::new();
        mocks
            .reviews
            .expect_find_by_id()
            .returning(move |_| Ok(review.clone()));
        mocks
            .reviews
            .expect_save()
            .withf(move |review| review.images() == [image])
            .times(1)
            .returning(|_| Ok(()));
        mocks.blobs.expect_upload().returning(move |_, _| Ok(image));

        let added = mocks
            .service()
            .add_image(id, Some("image/webp"), Bytes::from_static(b"webp"), &alice())
            .await
            .unwrap();
        assert_eq!(added, image);
    }
}
