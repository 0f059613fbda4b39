use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::modules::{media, review, shop, station};
use crate::shared::infrastructure::config::{AuthConfig, ServerConfig};
use crate::shared::infrastructure::identity::require_identity;
use crate::state::AppState;

/// Largest accepted request body (image uploads).
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Create the application router.
pub fn create_router(state: AppState, server: &ServerConfig, auth: AuthConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Shops
        .route(
            "/shops",
            get(shop::handlers::list_shops).post(shop::handlers::create_shop),
        )
        .route(
            "/shops/{id}",
            get(shop::handlers::get_shop)
                .put(shop::handlers::update_shop)
                .delete(shop::handlers::delete_shop),
        )
        .route(
            "/shops/{id}/images",
            post(shop::handlers::add_shop_image).delete(shop::handlers::remove_shop_image),
        )
        // Reviews
        .route(
            "/reviews",
            get(review::handlers::list_recent_reviews).post(review::handlers::create_review),
        )
        .route(
            "/reviews/{id}",
            get(review::handlers::get_review)
                .put(review::handlers::update_review)
                .delete(review::handlers::delete_review),
        )
        .route("/reviews/{id}/images", post(review::handlers::add_review_image))
        // Stations
        .route(
            "/stations",
            get(station::handlers::list_stations).post(station::handlers::create_station),
        )
        .route(
            "/stations/{id}",
            get(station::handlers::get_station)
                .put(station::handlers::rename_station)
                .delete(station::handlers::delete_station),
        )
        .route("/stations/{id}/shops", get(station::handlers::list_station_shops))
        // Images
        .route("/images", post(media::handlers::upload_image))
        .route("/images/{id}", get(media::handlers::get_image))
        .route_layer(middleware::from_fn_with_state(
            Arc::new(auth),
            require_identity,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            server.request_timeout,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
