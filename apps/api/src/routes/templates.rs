use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::layout::builder::validate_template;
use crate::models::template::Template;
use crate::repositories::TemplateRepo;
use crate::state::AppState;

/// GET /api/templates
pub async fn list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<Template>>, AppError> {
    Ok(Json(TemplateRepo::list(&state.db).await?))
}

/// GET /api/templates/:id
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Template>, AppError> {
    let template = TemplateRepo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(template))
}

/// POST /api/templates
pub async fn create_template(
    State(state): State<AppState>,
    Json(input): Json<Template>,
) -> Result<(StatusCode, Json<Template>), AppError> {
    let input = checked(input)?;
    let template = TemplateRepo::create(&state.db, &input).await?;

    info!(
        template_id = ?template.id,
        name = %template.name,
        "Template created"
    );
    Ok((StatusCode::CREATED, Json(template)))
}

/// PUT /api/templates/:id
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<Template>,
) -> Result<Json<Template>, AppError> {
    let input = checked(input)?;
    let template = TemplateRepo::update(&state.db, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    info!(template_id = id, "Template updated");
    Ok(Json(template))
}

/// DELETE /api/templates/:id
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !TemplateRepo::delete(&state.db, id).await? {
        return Err(not_found(id));
    }
    info!(template_id = id, "Template deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Validates a client template and normalises its name. The layout string is
/// kept exactly as sent.
fn checked(input: Template) -> Result<Template, AppError> {
    let blocks = validate_template(&input)?;
    tracing::debug!(blocks = blocks.len(), "Template layout accepted");
    Ok(Template {
        id: None,
        name: input.name.trim().to_string(),
        layout_json: input.layout_json,
    })
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Template {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_trims_name_and_drops_client_id() {
        let input = Template {
            id: Some(99),
            name: "  Recipe ".to_string(),
            layout_json: r#"[{"type":"text","id":"a","label":"Steps"}]"#.to_string(),
        };
        let out = checked(input).unwrap();
        assert_eq!(out.id, None);
        assert_eq!(out.name, "Recipe");
    }

    #[test]
    fn test_checked_rejects_empty_layout() {
        let input = Template {
            id: None,
            name: "Recipe".to_string(),
            layout_json: "[]".to_string(),
        };
        assert!(matches!(checked(input), Err(AppError::Validation(_))));
    }
}
