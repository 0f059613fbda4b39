use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::modules::media::application::UploadedImage;
use crate::modules::media::infrastructure::storage::DEFAULT_CONTENT_TYPE;
use crate::shared::errors::AppResult;
use crate::shared::utils::validation::Validator;
use crate::state::AppState;

/// Sent with every image download; ids are never reused.
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=31536000";

/// The request's `Content-Type`, if it is readable.
pub fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
}

/// POST /api/v1/images
pub async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<(StatusCode, Json<UploadedImage>)> {
    let image = state.media.upload(content_type(&headers), body).await?;
    Ok((StatusCode::CREATED, Json(image.into())))
}

/// GET /api/v1/images/{id}
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = Validator::parse_id("image id", &id)?;
    let blob = state.media.fetch(id).await?;

    let content_type = HeaderValue::from_str(&blob.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, HeaderValue::from_static(IMAGE_CACHE_CONTROL)),
        ],
        blob.data,
    )
        .into_response())
}
