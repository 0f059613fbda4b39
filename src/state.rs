use std::sync::Arc;

use crate::modules::media::{BlobStore, ImageUsageRepository, MediaService};
use crate::modules::review::{ReviewRepository, ReviewService};
use crate::modules::shop::{ShopRepository, ShopService};
use crate::modules::station::{StationRepository, StationService};

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub shops: Arc<ShopService>,
    pub reviews: Arc<ReviewService>,
    pub stations: Arc<StationService>,
    pub media: Arc<MediaService>,
}

impl AppState {
    pub fn new(
        shop_repository: Arc<dyn ShopRepository>,
        review_repository: Arc<dyn ReviewRepository>,
        station_repository: Arc<dyn StationRepository>,
        image_usage: Arc<dyn ImageUsageRepository>,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        let media = Arc::new(MediaService::new(blob_store, image_usage));

        Self {
            shops: Arc::new(ShopService::new(
                Arc::clone(&shop_repository),
                Arc::clone(&media),
            )),
            reviews: Arc::new(ReviewService::new(
                review_repository,
                Arc::clone(&shop_repository),
                Arc::clone(&media),
            )),
            stations: Arc::new(StationService::new(station_repository, shop_repository)),
            media,
        }
    }
}
