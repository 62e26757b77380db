//! Per-category file upload.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use galley_core::models::{FileCategory, UploadedFile};
use galley_core::AppError;
use galley_upload::{store_file, FileValidator};

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v0/uploads/{category}",
    tag = "uploads",
    params(
        ("category" = FileCategory, Path, description = "File category: document, image, or cover")
    ),
    responses(
        (status = 201, description = "File stored", body = UploadedFile),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    Path(category): Path<FileCategory>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadedFile>), HttpAppError> {
    let mut part = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .ok_or_else(|| AppError::InvalidInput("Missing filename".to_string()))?
                .to_string();
            let content_type = field
                .content_type()
                .ok_or_else(|| AppError::InvalidInput("Missing content type".to_string()))?
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file: {}", e)))?
                .to_vec();
            part = Some((filename, content_type, data));
            break;
        }
    }

    let (filename, content_type, data) =
        part.ok_or_else(|| AppError::InvalidInput("Missing 'file' field".to_string()))?;

    let policy = state.config.policy(category);
    FileValidator::from_policy(policy).validate_all(&filename, &content_type, data.len() as u64)?;

    let uploaded = store_file(
        state.storage.clone(),
        &policy.bucket,
        &filename,
        &content_type,
        data,
        category,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(uploaded)))
}
