use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::application::MAX_LIMIT;
use crate::shared::errors::AppError;

pub struct Validator;

impl Validator {
    pub fn validate_pagination(offset: i64, limit: i64) -> Result<(), AppError> {
        if offset < 0 {
            return Err(AppError::InvalidInput(
                "Offset cannot be negative".to_string(),
            ));
        }
        if limit <= 0 {
            return Err(AppError::InvalidInput(
                "Limit must be positive".to_string(),
            ));
        }
        if limit > MAX_LIMIT {
            return Err(AppError::InvalidInput(format!(
                "Limit cannot exceed {}",
                MAX_LIMIT
            )));
        }
        Ok(())
    }

    pub fn validate_time_window(
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if after > before {
            return Err(AppError::InvalidInput(format!(
                "'after' ({}) must not be later than 'before' ({})",
                after.to_rfc3339(),
                before.to_rfc3339()
            )));
        }
        Ok(())
    }

    /// Parse an identifier supplied by a client, naming the field on failure.
    pub fn parse_id(field: &str, raw: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::InvalidInput(format!("Invalid {} id: '{}'", field, raw)))
    }

    pub fn parse_ids(field: &str, raw: &[String]) -> Result<Vec<Uuid>, AppError> {
        raw.iter().map(|value| Self::parse_id(field, value)).collect()
    }
}
