use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::layout::error::LayoutError;
use crate::media::resolve_image_url;
use crate::models::article::{Article, ArticleCreateRequest, ArticleSummary};
use crate::repositories::{ArticleRepo, TemplateRepo};
use crate::state::AppState;

/// GET /api/articles
pub async fn list_articles(
    State(state): State<AppState>,
) -> Result<Json<Vec<Article>>, AppError> {
    Ok(Json(ArticleRepo::list(&state.db).await?))
}

/// GET /api/articles/feed
/// One card per article: resolved thumbnail url and preview snippet.
pub async fn article_feed(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArticleSummary>>, AppError> {
    let articles = ArticleRepo::list(&state.db).await?;
    let feed = articles
        .iter()
        .map(|article| summarize(article, &state.config.public_base_url))
        .collect();
    Ok(Json(feed))
}

/// GET /api/articles/:id
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Article>, AppError> {
    let article = ArticleRepo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(article))
}

/// POST /api/articles
pub async fn create_article(
    State(state): State<AppState>,
    Json(req): Json<ArticleCreateRequest>,
) -> Result<(StatusCode, Json<Article>), AppError> {
    let title = checked_title(&req)?;
    let template_id = existing_template_id(&state.db, &req).await?;
    let article = ArticleRepo::create(&state.db, title, &req.content, template_id).await?;

    info!(article_id = ?article.id, template_id = ?template_id, "Article created");
    Ok((StatusCode::CREATED, Json(article)))
}

/// PUT /api/articles/:id
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ArticleCreateRequest>,
) -> Result<Json<Article>, AppError> {
    let title = checked_title(&req)?;
    let template_id = existing_template_id(&state.db, &req).await?;
    let article = ArticleRepo::update(&state.db, id, title, &req.content, template_id)
        .await?
        .ok_or_else(|| not_found(id))?;

    info!(article_id = id, template_id = ?template_id, "Article updated");
    Ok(Json(article))
}

/// DELETE /api/articles/:id
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !ArticleRepo::delete(&state.db, id).await? {
        return Err(not_found(id));
    }
    info!(article_id = id, "Article deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Feed card for one article, with the thumbnail resolved against `base_url`.
pub fn summarize(article: &Article, base_url: &str) -> ArticleSummary {
    let preview = article.preview();
    ArticleSummary {
        id: article.id,
        title: article.title.clone(),
        thumbnail_url: preview
            .thumbnail_url
            .and_then(|value| resolve_image_url(base_url, &value)),
        preview_text: preview.preview_text,
    }
}

fn checked_title(req: &ArticleCreateRequest) -> Result<&str, AppError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(LayoutError::MissingTitle.into());
    }
    Ok(title)
}

/// A template reference must point at a stored template. A template object
/// without an id means the article has no template.
async fn existing_template_id(
    pool: &PgPool,
    req: &ArticleCreateRequest,
) -> Result<Option<i64>, AppError> {
    let Some(id) = req.template_id() else {
        return Ok(None);
    };
    match TemplateRepo::find_by_id(pool, id).await? {
        Some(_) => Ok(Some(id)),
        None => Err(AppError::BadRequest(format!("Template {id} does not exist"))),
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Article {id} not found"))
}
