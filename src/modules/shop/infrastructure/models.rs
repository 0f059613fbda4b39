use crate::schema::{shop_images, shop_payment_methods, shop_stations, shops};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::modules::shop::domain::entities::Shop;
use crate::modules::shop::domain::value_objects::{Coordinates, PaymentMethod, PostCode, ShopName};
use crate::shared::domain::value_objects::{ImageFile, UserId};
use crate::shared::errors::{AppError, AppResult, ValidationError};
use crate::shared::utils::collections::dedup_preserving_order;

// ============= SHOP MODELS =============

// For reading from database - with associations support
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = shops)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShopModel {
    pub id: Uuid,
    pub name: String,
    pub post_code: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub registerer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// For inserting new shops
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = shops)]
pub struct NewShop<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub post_code: &'a str,
    pub address: &'a str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub registerer: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Overwritten on upsert (excludes id and created_at). Cleared coordinates must become NULL.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = shops)]
#[diesel(treat_none_as_null = true)]
pub struct ShopChangeset<'a> {
    pub name: &'a str,
    pub post_code: &'a str,
    pub address: &'a str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub registerer: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ============= CHILD ROWS =============

#[derive(Queryable, Selectable, Insertable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(ShopModel, foreign_key = shop_id))]
#[diesel(table_name = shop_stations)]
#[diesel(primary_key(shop_id, station_id))]
pub struct ShopStationRow {
    pub shop_id: Uuid,
    pub station_id: Uuid,
    pub position: i32,
}

#[derive(Queryable, Selectable, Insertable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(ShopModel, foreign_key = shop_id))]
#[diesel(table_name = shop_payment_methods)]
#[diesel(primary_key(shop_id, payment_method))]
pub struct ShopPaymentMethodRow {
    pub shop_id: Uuid,
    pub payment_method: String,
    pub position: i32,
}

#[derive(Queryable, Selectable, Insertable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(ShopModel, foreign_key = shop_id))]
#[diesel(table_name = shop_images)]
#[diesel(primary_key(shop_id, image_id))]
pub struct ShopImageRow {
    pub shop_id: Uuid,
    pub image_id: Uuid,
    pub position: i32,
}

/// The full relational decomposition of one shop.
#[derive(Debug, Clone)]
pub struct ShopRows {
    pub stations: Vec<ShopStationRow>,
    pub payment_methods: Vec<ShopPaymentMethodRow>,
    pub images: Vec<ShopImageRow>,
}

impl<'a> From<&'a Shop> for NewShop<'a> {
    fn from(shop: &'a Shop) -> Self {
        Self {
            id: shop.id,
            name: shop.name.as_str(),
            post_code: shop.post_code.as_ref().map(PostCode::as_str).unwrap_or(""),
            address: &shop.address,
            latitude: shop.location.map(|c| c.latitude()),
            longitude: shop.location.map(|c| c.longitude()),
            registerer: shop.registerer.as_str(),
            created_at: shop.created_at,
            updated_at: shop.updated_at,
        }
    }
}

impl<'a> From<&'a Shop> for ShopChangeset<'a> {
    fn from(shop: &'a Shop) -> Self {
        let row = NewShop::from(shop);
        Self {
            name: row.name,
            post_code: row.post_code,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
            registerer: row.registerer,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Shop> for ShopRows {
    fn from(shop: &Shop) -> Self {
        let stations = dedup_preserving_order(shop.stations.iter().copied())
            .into_iter()
            .zip(0..)
            .map(|(station_id, position)| ShopStationRow {
                shop_id: shop.id,
                station_id,
                position,
            })
            .collect();

        let payment_methods = dedup_preserving_order(shop.payment_methods.iter().cloned())
            .into_iter()
            .zip(0..)
            .map(|(method, position)| ShopPaymentMethodRow {
                shop_id: shop.id,
                payment_method: method.into(),
                position,
            })
            .collect();

        let images = dedup_preserving_order(shop.images.iter().copied())
            .into_iter()
            .zip(0..)
            .map(|(image, position)| ShopImageRow {
                shop_id: shop.id,
                image_id: image.id(),
                position,
            })
            .collect();

        Self {
            stations,
            payment_methods,
            images,
        }
    }
}

impl ShopModel {
    /// Rebuild the aggregate, re-running every value object's validation.
    /// Child rows are expected in `position` order.
    pub fn into_entity(self, rows: ShopRows) -> AppResult<Shop> {
        let id = self.id;
        self.try_into_entity(rows).map_err(|e| {
            AppError::ConversionError(format!("Stored shop {} is invalid: {}", id, e))
        })
    }

    fn try_into_entity(self, rows: ShopRows) -> Result<Shop, ValidationError> {
        let payment_methods = rows
            .payment_methods
            .into_iter()
            .map(|row| PaymentMethod::new(row.payment_method))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Shop {
            id: self.id,
            name: ShopName::new(self.name)?,
            post_code: PostCode::parse_optional(&self.post_code)?,
            address: self.address,
            location: Coordinates::from_optional(self.latitude, self.longitude)?,
            stations: rows.stations.into_iter().map(|row| row.station_id).collect(),
            images: rows
                .images
                .into_iter()
                .map(|row| ImageFile::from_id(row.image_id))
                .collect(),
            payment_methods,
            registerer: UserId::new(self.registerer)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
