pub mod articles;
pub mod health;
pub mod templates;
pub mod uploads;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Templates
        .route(
            "/api/templates",
            get(templates::list_templates).post(templates::create_template),
        )
        .route(
            "/api/templates/:id",
            get(templates::get_template)
                .put(templates::update_template)
                .delete(templates::delete_template),
        )
        // Articles
        .route(
            "/api/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route("/api/articles/feed", get(articles::article_feed))
        .route(
            "/api/articles/:id",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        // Images
        .route("/api/upload", post(uploads::upload_image))
        .route("/uploads/:name", get(uploads::get_upload))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
