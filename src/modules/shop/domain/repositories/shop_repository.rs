use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::shop::domain::entities::Shop;
use crate::shared::application::PageRequest;
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShopRepository: Send + Sync {
    /// Upsert the shop row and replace its station, payment method and image rows,
    /// all in one transaction.
    async fn save(&self, shop: &Shop) -> AppResult<()>;

    /// Fails with `NotFound` when no shop has this id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Shop>;

    async fn find_all(&self) -> AppResult<Vec<Shop>>;

    async fn find_all_with_limit(&self, page: PageRequest) -> AppResult<Vec<Shop>>;

    /// Shops linked to the station, oldest first.
    async fn find_by_station(&self, station_id: Uuid) -> AppResult<Vec<Shop>>;

    /// Removes the child rows and then the shop. `NotFound` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}
