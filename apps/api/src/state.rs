use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::storage::ImageStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Image storage backend. Local directory by default, S3 when configured.
    pub images: Arc<dyn ImageStore>,
}
