use std::sync::Arc;

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use tokio::task;

use crate::modules::media::domain::ImageUsageRepository;
use crate::schema::{review_images, shop_images};
use crate::shared::domain::value_objects::ImageFile;
use crate::shared::errors::AppResult;
use crate::shared::Database;

/// Looks for the image in every child table that stores image references.
pub struct ImageUsageRepositoryImpl {
    db: Arc<Database>,
}

impl ImageUsageRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ImageUsageRepository for ImageUsageRepositoryImpl {
    async fn is_in_use(&self, image: &ImageFile) -> AppResult<bool> {
        let db = Arc::clone(&self.db);
        let image_id = image.id();

        task::spawn_blocking(move || -> AppResult<bool> {
            let mut conn = db.get_connection()?;

            let by_shop = diesel::select(exists(
                shop_images::table.filter(shop_images::image_id.eq(image_id)),
            ))
            .get_result::<bool>(&mut conn)?;
            if by_shop {
                return Ok(true);
            }

            let by_review = diesel::select(exists(
                review_images::table.filter(review_images::image_id.eq(image_id)),
            ))
            .get_result::<bool>(&mut conn)?;
            Ok(by_review)
        })
        .await?
    }
}
