use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::media::{content_type_for, is_valid_stored_name, public_upload_url, stored_image_name};
use crate::models::article::UploadResponse;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

/// POST /api/upload
///
/// Accepts a multipart body with a `file` part and answers with the relative
/// url the image is served from. Other parts are ignored.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original = field.file_name().unwrap_or("upload").to_string();
        let data = field.bytes().await.map_err(bad_multipart)?;
        if data.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }

        let name = stored_image_name(chrono::Utc::now().timestamp_millis(), &original);
        // Stored type comes from the sanitized extension, never from the part header.
        let content_type = content_type_for(&name);
        let size = data.len();
        state.images.put(&name, data, content_type).await?;

        info!(
            name = %name,
            bytes = size,
            backend = state.images.backend(),
            "Image uploaded"
        );
        return Ok(Json(UploadResponse {
            url: public_upload_url(&name),
        }));
    }

    Err(AppError::BadRequest(format!(
        "Multipart part '{FILE_FIELD}' is required"
    )))
}

/// GET /uploads/:name
pub async fn get_upload(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_stored_name(&name) {
        return Err(AppError::NotFound(format!("Image {name} not found")));
    }
    let image = state
        .images
        .get(&name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Image {name} not found")))?;

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
        ],
        image.bytes,
    ))
}

fn bad_multipart(err: MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart body: {err}"))
}
