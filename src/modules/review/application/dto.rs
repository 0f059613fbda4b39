use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::review::domain::entities::ReviewDetails;
use crate::modules::review::domain::repositories::ReviewQuery;
use crate::modules::review::domain::value_objects::Rating;
use crate::shared::application::{PageRequest, PaginationParams};
use crate::shared::domain::value_objects::{ImageFile, UserId};
use crate::shared::errors::{AppResult, ValidationError};
use crate::shared::utils::validation::Validator;

/// Create/update request body. The author always comes from the caller's identity.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewInput {
    /// Required on create; on update it may be omitted but must not name another shop.
    #[serde(default)]
    pub shop: Option<String>,
    pub rating: i32,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl ReviewInput {
    pub fn shop_id(&self) -> AppResult<Option<Uuid>> {
        self.shop
            .as_deref()
            .map(|raw| Validator::parse_id("shop", raw))
            .transpose()
    }

    pub fn into_details(self) -> AppResult<ReviewDetails> {
        let images = self
            .images
            .iter()
            .map(|reference| ImageFile::parse_reference(reference))
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(ReviewDetails {
            rating: Rating::new(self.rating)?,
            content: self.content,
            images,
        })
    }
}

/// Query string of `GET /reviews`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentReviewsParams {
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub shop: Option<String>,
    pub author: Option<String>,
}

impl RecentReviewsParams {
    pub fn into_query(self) -> AppResult<ReviewQuery> {
        if let (Some(after), Some(before)) = (self.after, self.before) {
            Validator::validate_time_window(after, before)?;
        }

        let page: PageRequest = PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
        .page_or_default()?;

        let shop_id = match self.shop.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(Validator::parse_id("shop", raw)?),
            _ => None,
        };
        let author = match self.author.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(UserId::new(raw)?),
            _ => None,
        };

        Ok(ReviewQuery {
            after: self.after,
            before: self.before,
            shop_id,
            author,
            page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::application::DEFAULT_LIMIT;
    use crate::shared::errors::AppError;
    use chrono::TimeZone;

    #[test]
    fn test_review_input_from_json() {
        let image = ImageFile::generate();
        let shop = Uuid::now_v7();
        let input: ReviewInput = serde_json::from_value(serde_json::json!({
            "shop": shop.to_string(),
            "rating": 2,
            "content": "Nice terrace",
            "images": [image.path()],
        }))
        .unwrap();

        assert_eq!(input.shop_id().unwrap(), Some(shop));
        let details = input.into_details().unwrap();
        assert_eq!(details.rating.value(), 2);
        assert_eq!(details.images, vec![image]);
    }

    #[test]
    fn test_review_input_requires_rating() {
        let parsed = serde_json::from_value::<ReviewInput>(serde_json::json!({"content": "x"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_review_input_rejects_bad_rating() {
        let input: ReviewInput = serde_json::from_value(serde_json::json!({"rating": 4})).unwrap();
        assert!(matches!(
            input.into_details().unwrap_err(),
            AppError::ValidationError(ValidationError::InvalidRating(4))
        ));
    }

    #[test]
    fn test_empty_params_are_unfiltered() {
        let query = RecentReviewsParams::default().into_query().unwrap();
        assert_eq!(query.after, None);
        assert_eq!(query.before, None);
        assert_eq!(query.shop_id, None);
        assert_eq!(query.author, None);
        assert_eq!(query.page.limit, DEFAULT_LIMIT);
        assert_eq!(query.page.offset, 0);
    }

    #[test]
    fn test_params_with_filters() {
        let shop = Uuid::now_v7();
        let params = RecentReviewsParams {
            after: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            before: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
            limit: Some(5),
            offset: Some(10),
            shop: Some(shop.to_string()),
            author: Some("alice".to_string()),
        };

        let query = params.into_query().unwrap();
        assert_eq!(query.shop_id, Some(shop));
        assert_eq!(query.author, Some(UserId::new("alice").unwrap()));
        assert_eq!(query.page, PageRequest { limit: 5, offset: 10 });
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let params = RecentReviewsParams {
            after: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
            before: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        assert!(matches!(
            params.into_query().unwrap_err(),
            AppError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_blank_filters_are_ignored() {
        let params = RecentReviewsParams {
            shop: Some("".to_string()),
            author: Some("  ".to_string()),
            ..Default::default()
        };
        let query = params.into_query().unwrap();
        assert!(query.shop_id.is_none());
        assert!(query.author.is_none());
    }
}
