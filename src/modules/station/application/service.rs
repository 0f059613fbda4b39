use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::log_info;
use crate::modules::shop::domain::{entities::Shop, repositories::ShopRepository};
use crate::modules::station::domain::{
    entities::Station, repositories::StationRepository, value_objects::StationName,
};
use crate::shared::application::PageRequest;
use crate::shared::errors::AppResult;

/// Create/rename request body.
#[derive(Debug, Clone, Deserialize)]
pub struct StationInput {
    pub name: String,
}

pub struct StationService {
    stations: Arc<dyn StationRepository>,
    shops: Arc<dyn ShopRepository>,
}

impl StationService {
    pub fn new(stations: Arc<dyn StationRepository>, shops: Arc<dyn ShopRepository>) -> Self {
        Self { stations, shops }
    }

    pub async fn create(&self, input: StationInput) -> AppResult<Station> {
        let station = Station::new(StationName::new(input.name)?);
        self.stations.save(&station).await?;

        log_info!("Station {} '{}' created", station.id, station.name);
        Ok(station)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Station> {
        self.stations.find_by_id(id).await
    }

    pub async fn list(&self, page: Option<PageRequest>) -> AppResult<Vec<Station>> {
        match page {
            Some(page) => self.stations.find_all_with_limit(page).await,
            None => self.stations.find_all().await,
        }
    }

    pub async fn rename(&self, id: Uuid, input: StationInput) -> AppResult<Station> {
        let name = StationName::new(input.name)?;
        let mut station = self.stations.find_by_id(id).await?;

        station.rename(name);
        self.stations.save(&station).await?;
        Ok(station)
    }

    /// `Conflict` while any shop still lists the station.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.stations.delete(id).await?;
        log_info!("Station {} deleted", id);
        Ok(())
    }

    /// Shops near the station. `NotFound` for an unknown station rather than an empty list.
    pub async fn shops_around(&self, id: Uuid) -> AppResult<Vec<Shop>> {
        self.stations.find_by_id(id).await?;
        self.shops.find_by_station(id).await
    }
}
