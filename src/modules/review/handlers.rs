use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::modules::media::application::UploadedImage;
use crate::modules::media::handlers::content_type;
use crate::modules::review::application::{RecentReviewsParams, ReviewInput};
use crate::modules::review::domain::entities::Review;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::CurrentUser;
use crate::shared::utils::validation::Validator;
use crate::state::AppState;

/// GET /api/v1/reviews
///
/// Newest first; optional `after`/`before` (RFC 3339), `shop`, `author`, `limit`, `offset`.
pub async fn list_recent_reviews(
    State(state): State<AppState>,
    Query(params): Query<RecentReviewsParams>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = state.reviews.recent(params.into_query()?).await?;
    Ok(Json(reviews))
}

/// POST /api/v1/reviews
pub async fn create_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<ReviewInput>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let review = state.reviews.create(input, user).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /api/v1/reviews/{id}
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Review>> {
    let id = Validator::parse_id("review id", &id)?;
    Ok(Json(state.reviews.get(id).await?))
}

/// PUT /api/v1/reviews/{id}
pub async fn update_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<ReviewInput>,
) -> AppResult<Json<Review>> {
    let id = Validator::parse_id("review id", &id)?;
    Ok(Json(state.reviews.update(id, input, &user).await?))
}

/// DELETE /api/v1/reviews/{id}
pub async fn delete_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = Validator::parse_id("review id", &id)?;
    state.reviews.delete(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/reviews/{id}/images
pub async fn add_review_image(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<(StatusCode, Json<UploadedImage>)> {
    let id = Validator::parse_id("review id", &id)?;
    let image = state
        .reviews
        .add_image(id, content_type(&headers), body, &user)
        .await?;
    Ok((StatusCode::CREATED, Json(image.into())))
}
