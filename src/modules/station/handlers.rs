use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::modules::shop::domain::entities::Shop;
use crate::modules::station::application::StationInput;
use crate::modules::station::domain::entities::Station;
use crate::shared::application::PaginationParams;
use crate::shared::errors::AppResult;
use crate::shared::utils::validation::Validator;
use crate::state::AppState;

pub async fn list_stations(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Station>>> {
    Ok(Json(state.stations.list(params.page()?).await?))
}

pub async fn create_station(
    State(state): State<AppState>,
    Json(input): Json<StationInput>,
) -> AppResult<(StatusCode, Json<Station>)> {
    let station = state.stations.create(input).await?;
    Ok((StatusCode::CREATED, Json(station)))
}

pub async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Station>> {
    let id = Validator::parse_id("station id", &id)?;
    Ok(Json(state.stations.get(id).await?))
}

pub async fn rename_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<StationInput>,
) -> AppResult<Json<Station>> {
    let id = Validator::parse_id("station id", &id)?;
    Ok(Json(state.stations.rename(id, input).await?))
}

pub async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = Validator::parse_id("station id", &id)?;
    state.stations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/stations/{id}/shops
pub async fn list_station_shops(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Shop>>> {
    let id = Validator::parse_id("station id", &id)?;
    Ok(Json(state.stations.shops_around(id).await?))
}
