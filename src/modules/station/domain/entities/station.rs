use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::modules::station::domain::value_objects::StationName;
use crate::shared::domain::clock;
use crate::shared::errors::ValidationError;

/// A transit station shops can be located near.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: Uuid,
    pub name: StationName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Station {
    pub fn new(name: StationName) -> Self {
        let now = clock::now();
        Self {
            id: Uuid::now_v7(),
            name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a station from stored values, re-running validation.
    pub fn restore(
        id: Uuid,
        name: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: StationName::new(name)?,
            created_at,
            updated_at,
        })
    }

    pub fn rename(&mut self, name: StationName) {
        self.name = name;
        self.updated_at = clock::now();
    }
}
