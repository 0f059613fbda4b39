pub mod modules;
pub mod router;
mod schema;
pub mod shared;
pub mod state;

use std::sync::Arc;

use modules::{
    media::{BlobStore, ImageUsageRepositoryImpl, ObjectStoreBlobStore},
    review::ReviewRepositoryImpl,
    shop::ShopRepositoryImpl,
    station::StationRepositoryImpl,
};
use router::create_router;
use shared::infrastructure::AppConfig;
use shared::utils::logger::init_logger;
use shared::Database;
use state::AppState;
use tokio::net::TcpListener;

/// Load configuration, migrate the database and serve the HTTP API until Ctrl-C.
pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_logger();

    let database = Arc::new(Database::new(&config.database)?);
    {
        let database = Arc::clone(&database);
        tokio::task::spawn_blocking(move || database.run_migrations()).await??;
    }

    let blob_store: Arc<dyn BlobStore> = Arc::new(ObjectStoreBlobStore::s3(&config.storage)?);

    let state = AppState::new(
        Arc::new(ShopRepositoryImpl::new(Arc::clone(&database))),
        Arc::new(ReviewRepositoryImpl::new(Arc::clone(&database))),
        Arc::new(StationRepositoryImpl::new(Arc::clone(&database))),
        Arc::new(ImageUsageRepositoryImpl::new(Arc::clone(&database))),
        blob_store,
    );

    if config.auth.debug_user.is_some() {
        log_warn!("DEBUG is on: requests without an identity header are accepted");
    }

    let app = create_router(state, &config.server, config.auth.clone());

    let listener = TcpListener::bind(config.server.addr).await?;
    log_info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log_error!("Failed to listen for shutdown signal: {}", e);
    }
}
