use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pocketwriter_api::config::Config;
use pocketwriter_api::db::{create_pool, ensure_schema};
use pocketwriter_api::routes::build_router;
use pocketwriter_api::state::AppState;
use pocketwriter_api::storage::{ImageStore, LocalImageStore, S3ImageStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("pocketwriter_api={},tower_http=info", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PocketWriter API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;

    // Image storage: S3 / MinIO when a bucket is configured, local disk otherwise
    let images: Arc<dyn ImageStore> = match &config.s3 {
        Some(settings) => Arc::new(S3ImageStore::from_settings(settings).await),
        None => Arc::new(LocalImageStore::new(config.upload_dir.clone())),
    };
    info!("Image storage backend: {}", images.backend());

    let state = AppState {
        db,
        config: config.clone(),
        images,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
