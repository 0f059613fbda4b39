use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::station::domain::entities::Station;
use crate::shared::application::PageRequest;
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Insert the station or overwrite its mutable columns.
    async fn save(&self, station: &Station) -> AppResult<()>;

    /// Fails with `NotFound` when no station has this id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Station>;

    async fn find_all(&self) -> AppResult<Vec<Station>>;

    async fn find_all_with_limit(&self, page: PageRequest) -> AppResult<Vec<Station>>;

    /// Fails with `NotFound` when nothing was deleted and with `Conflict`
    /// while a shop still references the station.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}
