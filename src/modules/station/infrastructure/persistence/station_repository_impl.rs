use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;
use uuid::Uuid;

use crate::log_debug;
use crate::modules::station::domain::{entities::Station, repositories::StationRepository};
use crate::modules::station::infrastructure::models::{NewStation, StationChangeset, StationModel};
use crate::schema::stations;
use crate::shared::application::PageRequest;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::run_in_transaction;
use crate::shared::utils::logger::TimedOperation;
use crate::shared::Database;

pub struct StationRepositoryImpl {
    db: Arc<Database>,
}

impl StationRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn into_entities(models: Vec<StationModel>) -> AppResult<Vec<Station>> {
        models.into_iter().map(StationModel::into_entity).collect()
    }
}

#[async_trait]
impl StationRepository for StationRepositoryImpl {
    async fn save(&self, station: &Station) -> AppResult<()> {
        let db = Arc::clone(&self.db);
        let station = station.clone();

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;

            diesel::insert_into(stations::table)
                .values(NewStation::from(&station))
                .on_conflict(stations::id)
                .do_update()
                .set(StationChangeset::from(&station))
                .execute(&mut conn)?;

            log_debug!("Saved station {} ({})", station.id, station.name);
            Ok(())
        })
        .await?
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Station> {
        let db = Arc::clone(&self.db);

        let model = task::spawn_blocking(move || -> AppResult<Option<StationModel>> {
            let mut conn = db.get_connection()?;
            let m = stations::table
                .find(id)
                .select(StationModel::as_select())
                .first(&mut conn)
                .optional()?;
            Ok(m)
        })
        .await??;

        model
            .ok_or_else(|| AppError::NotFound(format!("Station {} not found", id)))?
            .into_entity()
    }

    async fn find_all(&self) -> AppResult<Vec<Station>> {
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<StationModel>> {
            let mut conn = db.get_connection()?;
            let m = stations::table
                .order(stations::id.asc())
                .select(StationModel::as_select())
                .load(&mut conn)?;
            Ok(m)
        })
        .await??;

        Self::into_entities(models)
    }

    async fn find_all_with_limit(&self, page: PageRequest) -> AppResult<Vec<Station>> {
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<StationModel>> {
            let mut conn = db.get_connection()?;
            let m = stations::table
                .order(stations::id.asc())
                .limit(page.limit)
                .offset(page.offset)
                .select(StationModel::as_select())
                .load(&mut conn)?;
            Ok(m)
        })
        .await??;

        Self::into_entities(models)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<()> {
            let timer = TimedOperation::new("delete_station");
            let mut conn = db.get_connection()?;

            run_in_transaction(&mut conn, "delete_station", |conn| {
                let deleted = diesel::delete(stations::table.find(id)).execute(conn)?;
                if deleted == 0 {
                    return Err(AppError::NotFound(format!("Station {} not found", id)));
                }
                Ok(())
            })?;

            timer.finish_with_info(&id.to_string());
            Ok(())
        })
        .await?
    }
}
