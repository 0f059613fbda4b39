use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use crate::modules::media::application::MediaService;
use crate::modules::shop::application::dto::ShopInput;
use crate::modules::shop::domain::{entities::Shop, repositories::ShopRepository};
use crate::shared::application::PageRequest;
use crate::shared::domain::value_objects::{ImageFile, UserId};
use crate::shared::errors::{AppError, AppResult};
use crate::{log_info, log_warn};

/// Shop use cases: load, mutate, re-save.
pub struct ShopService {
    shops: Arc<dyn ShopRepository>,
    media: Arc<MediaService>,
}

impl ShopService {
    pub fn new(shops: Arc<dyn ShopRepository>, media: Arc<MediaService>) -> Self {
        Self { shops, media }
    }

    pub async fn create(&self, input: ShopInput, registerer: UserId) -> AppResult<Shop> {
        let shop = Shop::new(input.into_details()?, registerer);
        self.shops.save(&shop).await?;

        log_info!("Shop {} '{}' registered by {}", shop.id, shop.name, shop.registerer);
        Ok(shop)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Shop> {
        self.shops.find_by_id(id).await
    }

    pub async fn list(&self, page: Option<PageRequest>) -> AppResult<Vec<Shop>> {
        match page {
            Some(page) => self.shops.find_all_with_limit(page).await,
            None => self.shops.find_all().await,
        }
    }

    pub async fn update(&self, id: Uuid, input: ShopInput, user: &UserId) -> AppResult<Shop> {
        let details = input.into_details()?;
        let mut shop = self.owned_shop(id, user).await?;

        let before = shop.images.clone();
        shop.update(details);
        self.shops.save(&shop).await?;

        let dropped: Vec<ImageFile> = before
            .into_iter()
            .filter(|image| !shop.images.contains(image))
            .collect();
        self.media.discard(&dropped).await;

        Ok(shop)
    }

    /// Rows go first; image blobs are cleaned up afterwards on a best-effort basis.
    pub async fn delete(&self, id: Uuid, user: &UserId) -> AppResult<()> {
        let shop = self.owned_shop(id, user).await?;
        self.shops.delete(id).await?;

        log_info!("Shop {} deleted by {}", id, user);
        self.media.discard(&shop.images).await;
        Ok(())
    }

    /// Any authenticated user may contribute a photo.
    pub async fn add_image(
        &self,
        id: Uuid,
        content_type: Option<&str>,
        data: Bytes,
    ) -> AppResult<ImageFile> {
        let mut shop = self.shops.find_by_id(id).await?;
        let image = self.media.upload(content_type, data).await?;

        shop.attach_image(image);
        if let Err(e) = self.shops.save(&shop).await {
            log_warn!("Attaching image {} to shop {} failed: {}", image.id(), id, e);
            self.media.discard(&[image]).await;
            return Err(e);
        }

        Ok(image)
    }

    pub async fn remove_image(&self, id: Uuid, reference: &str, user: &UserId) -> AppResult<Shop> {
        let image = ImageFile::parse_reference(reference)?;
        let mut shop = self.owned_shop(id, user).await?;

        if !shop.detach_image(&image) {
            return Err(AppError::NotFound(format!(
                "Image {} is not attached to shop {}",
                image.id(),
                id
            )));
        }
        self.shops.save(&shop).await?;
        self.media.discard(&[image]).await;

        Ok(shop)
    }

    async fn owned_shop(&self, id: Uuid, user: &UserId) -> AppResult<Shop> {
        let shop = self.shops.find_by_id(id).await?;
        if !shop.is_registered_by(user) {
            return Err(AppError::Forbidden(format!(
                "Shop {} can only be changed by its registerer",
                id
            )));
        }
        Ok(shop)
    }
}
