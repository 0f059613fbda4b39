use crate::schema::stations;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::modules::station::domain::entities::Station;
use crate::shared::errors::{AppError, AppResult};

// For reading from database
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = stations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StationModel {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// For inserting new stations
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = stations)]
pub struct NewStation<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Overwritten on conflict (excludes id and created_at)
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = stations)]
pub struct StationChangeset<'a> {
    pub name: &'a str,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Station> for NewStation<'a> {
    fn from(station: &'a Station) -> Self {
        Self {
            id: station.id,
            name: station.name.as_str(),
            created_at: station.created_at,
            updated_at: station.updated_at,
        }
    }
}

impl<'a> From<&'a Station> for StationChangeset<'a> {
    fn from(station: &'a Station) -> Self {
        Self {
            name: station.name.as_str(),
            updated_at: station.updated_at,
        }
    }
}

impl StationModel {
    pub fn into_entity(self) -> AppResult<Station> {
        let id = self.id;
        Station::restore(self.id, self.name, self.created_at, self.updated_at).map_err(|e| {
            AppError::ConversionError(format!("Stored station {} is invalid: {}", id, e))
        })
    }
}
