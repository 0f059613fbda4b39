use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::PgConnection;
use tokio::task;
use uuid::Uuid;

use crate::log_debug;
use crate::modules::shop::domain::{entities::Shop, repositories::ShopRepository};
use crate::modules::shop::infrastructure::models::{
    NewShop, ShopChangeset, ShopImageRow, ShopModel, ShopPaymentMethodRow, ShopRows, ShopStationRow,
};
use crate::schema::{shop_images, shop_payment_methods, shop_stations, shops};
use crate::shared::application::PageRequest;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::run_in_transaction;
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::shared::Database;

pub struct ShopRepositoryImpl {
    db: Arc<Database>,
}

impl ShopRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Batch-load the child collections of `models` and rebuild the aggregates,
    /// preserving the order of `models`.
    fn load_with_children(conn: &mut PgConnection, models: Vec<ShopModel>) -> AppResult<Vec<Shop>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let stations = ShopStationRow::belonging_to(&models)
            .select(ShopStationRow::as_select())
            .order(shop_stations::position.asc())
            .load::<ShopStationRow>(conn)?
            .grouped_by(&models);

        let payment_methods = ShopPaymentMethodRow::belonging_to(&models)
            .select(ShopPaymentMethodRow::as_select())
            .order(shop_payment_methods::position.asc())
            .load::<ShopPaymentMethodRow>(conn)?
            .grouped_by(&models);

        let images = ShopImageRow::belonging_to(&models)
            .select(ShopImageRow::as_select())
            .order(shop_images::position.asc())
            .load::<ShopImageRow>(conn)?
            .grouped_by(&models);

        models
            .into_iter()
            .zip(stations)
            .zip(payment_methods)
            .zip(images)
            .map(|(((model, stations), payment_methods), images)| {
                model.into_entity(ShopRows {
                    stations,
                    payment_methods,
                    images,
                })
            })
            .collect()
    }

    fn delete_children(conn: &mut PgConnection, id: Uuid) -> AppResult<()> {
        diesel::delete(shop_stations::table.filter(shop_stations::shop_id.eq(id))).execute(conn)?;
        diesel::delete(shop_payment_methods::table.filter(shop_payment_methods::shop_id.eq(id)))
            .execute(conn)?;
        diesel::delete(shop_images::table.filter(shop_images::shop_id.eq(id))).execute(conn)?;
        Ok(())
    }
}

#[async_trait]
impl ShopRepository for ShopRepositoryImpl {
    async fn save(&self, shop: &Shop) -> AppResult<()> {
        let db = Arc::clone(&self.db);
        let shop = shop.clone();

        task::spawn_blocking(move || -> AppResult<()> {
            let timer = TimedOperation::new("save_shop");
            let mut conn = db.get_connection()?;
            let rows = ShopRows::from(&shop);

            run_in_transaction(&mut conn, "save_shop", |conn| {
                diesel::insert_into(shops::table)
                    .values(NewShop::from(&shop))
                    .on_conflict(shops::id)
                    .do_update()
                    .set(ShopChangeset::from(&shop))
                    .execute(conn)?;

                Self::delete_children(conn, shop.id)?;

                if !rows.stations.is_empty() {
                    diesel::insert_into(shop_stations::table)
                        .values(&rows.stations)
                        .execute(conn)?;
                }
                if !rows.payment_methods.is_empty() {
                    diesel::insert_into(shop_payment_methods::table)
                        .values(&rows.payment_methods)
                        .execute(conn)?;
                }
                if !rows.images.is_empty() {
                    diesel::insert_into(shop_images::table)
                        .values(&rows.images)
                        .execute(conn)?;
                }
                Ok(())
            })?;

            log_debug!(
                "Saved shop {} with {} stations, {} payment methods, {} images",
                shop.id,
                rows.stations.len(),
                rows.payment_methods.len(),
                rows.images.len()
            );
            timer.finish_with_info(&shop.id.to_string());
            Ok(())
        })
        .await?
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Shop> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Shop> {
            let mut conn = db.get_connection()?;

            let model = shops::table
                .find(id)
                .select(ShopModel::as_select())
                .first(&mut conn)
                .optional()?
                .ok_or_else(|| AppError::NotFound(format!("Shop {} not found", id)))?;

            Self::load_with_children(&mut conn, vec![model])?
                .into_iter()
                .next()
                .ok_or_else(|| AppError::NotFound(format!("Shop {} not found", id)))
        })
        .await?
    }

    async fn find_all(&self) -> AppResult<Vec<Shop>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<Shop>> {
            let start = std::time::Instant::now();
            let mut conn = db.get_connection()?;

            let models = shops::table
                .order(shops::id.asc())
                .select(ShopModel::as_select())
                .load(&mut conn)?;
            let result = Self::load_with_children(&mut conn, models)?;

            LogContext::db_operation("find_all", "shops", Some(start.elapsed().as_millis() as u64));
            Ok(result)
        })
        .await?
    }

    async fn find_all_with_limit(&self, page: PageRequest) -> AppResult<Vec<Shop>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<Shop>> {
            let mut conn = db.get_connection()?;

            let models = shops::table
                .order(shops::id.asc())
                .limit(page.limit)
                .offset(page.offset)
                .select(ShopModel::as_select())
                .load(&mut conn)?;

            Self::load_with_children(&mut conn, models)
        })
        .await?
    }

    async fn find_by_station(&self, station_id: Uuid) -> AppResult<Vec<Shop>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<Shop>> {
            let mut conn = db.get_connection()?;

            let models = shops::table
                .inner_join(shop_stations::table)
                .filter(shop_stations::station_id.eq(station_id))
                .order(shops::id.asc())
                .select(ShopModel::as_select())
                .load(&mut conn)?;

            Self::load_with_children(&mut conn, models)
        })
        .await?
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;

            run_in_transaction(&mut conn, "delete_shop", |conn| {
                Self::delete_children(conn, id)?;

                let deleted = diesel::delete(shops::table.find(id)).execute(conn)?;
                if deleted == 0 {
                    return Err(AppError::NotFound(format!("Shop {} not found", id)));
                }
                Ok(())
            })?;

            log_debug!("Deleted shop {}", id);
            Ok(())
        })
        .await?
    }
}
