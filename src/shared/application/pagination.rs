/// Offset/limit pagination shared by every listing query
use serde::Deserialize;

use crate::shared::errors::AppResult;
use crate::shared::utils::validation::Validator;

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Raw `limit` / `offset` query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Validated window into an ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PageRequest {
    pub fn new(limit: i64, offset: i64) -> AppResult<Self> {
        Validator::validate_pagination(offset, limit)?;
        Ok(Self { limit, offset })
    }
}

impl PaginationParams {
    /// `None` when the client asked for no window at all.
    pub fn page(&self) -> AppResult<Option<PageRequest>> {
        match (self.limit, self.offset) {
            (None, None) => Ok(None),
            (limit, offset) => {
                PageRequest::new(limit.unwrap_or(DEFAULT_LIMIT), offset.unwrap_or(0)).map(Some)
            }
        }
    }

    /// Always produces a window, falling back to the defaults.
    pub fn page_or_default(&self) -> AppResult<PageRequest> {
        Ok(self.page()?.unwrap_or_default())
    }
}
