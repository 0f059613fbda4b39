use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::modules::media::application::UploadedImage;
use crate::modules::media::handlers::content_type;
use crate::modules::shop::application::{ImageReferenceInput, ShopInput};
use crate::modules::shop::domain::entities::Shop;
use crate::shared::application::PaginationParams;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::CurrentUser;
use crate::shared::utils::validation::Validator;
use crate::state::AppState;

/// GET /api/v1/shops
pub async fn list_shops(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Shop>>> {
    let shops = state.shops.list(params.page()?).await?;
    Ok(Json(shops))
}

/// POST /api/v1/shops
pub async fn create_shop(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<ShopInput>,
) -> AppResult<(StatusCode, Json<Shop>)> {
    let shop = state.shops.create(input, user).await?;
    Ok((StatusCode::CREATED, Json(shop)))
}

/// GET /api/v1/shops/{id}
pub async fn get_shop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Shop>> {
    let id = Validator::parse_id("shop id", &id)?;
    Ok(Json(state.shops.get(id).await?))
}

/// PUT /api/v1/shops/{id}
pub async fn update_shop(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<ShopInput>,
) -> AppResult<Json<Shop>> {
    let id = Validator::parse_id("shop id", &id)?;
    Ok(Json(state.shops.update(id, input, &user).await?))
}

/// DELETE /api/v1/shops/{id}
pub async fn delete_shop(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = Validator::parse_id("shop id", &id)?;
    state.shops.delete(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/shops/{id}/images
///
/// The request body is the raw image; its `Content-Type` is stored alongside.
pub async fn add_shop_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<(StatusCode, Json<UploadedImage>)> {
    let id = Validator::parse_id("shop id", &id)?;
    let image = state
        .shops
        .add_image(id, content_type(&headers), body)
        .await?;
    Ok((StatusCode::CREATED, Json(image.into())))
}

/// DELETE /api/v1/shops/{id}/images
pub async fn remove_shop_image(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<ImageReferenceInput>,
) -> AppResult<Json<Shop>> {
    let id = Validator::parse_id("shop id", &id)?;
    Ok(Json(
        state.shops.remove_image(id, &input.image_url, &user).await?,
    ))
}

