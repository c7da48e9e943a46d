//! Version handlers — listing, multipart upload, download.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use uuid::Uuid;

use collabtrack_core::error::AppError;
use collabtrack_entity::version::Version;
use collabtrack_service::upload::{UploadParams, UploadReceipt};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/projects/{id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Version>>>, ApiError> {
    let versions = state.project_service.list_versions(&auth, id).await?;
    Ok(Json(ApiResponse::ok(versions)))
}

/// POST /api/projects/{id}/versions
///
/// Multipart form: a required `file` part and an optional `note` part.
pub async fn upload_version(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadReceipt>>), ApiError> {
    let (file_name, data, note) = read_upload_form(multipart).await?;

    let receipt = state
        .upload_service
        .upload_version(
            &auth,
            UploadParams {
                project_id: id,
                file_name,
                note,
                data,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(receipt))))
}

/// GET /api/projects/{id}/versions/{number}/download
pub async fn download_version(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, number)): Path<(Uuid, i32)>,
) -> Result<Response, ApiError> {
    let download = state
        .project_service
        .download_version(&auth, id, number)
        .await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download.file_name),
        )
        .header(header::CONTENT_LENGTH, download.data.len())
        .body(Body::from(download.data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// Pull the `file` part (name + bytes) and the optional `note` part out of
/// the multipart form.
async fn read_upload_form(
    mut multipart: Multipart,
) -> Result<(String, Bytes, Option<String>), ApiError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut note: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read file part: {e}")))?;
                file = Some((name, data));
            }
            Some("note") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read note part: {e}")))?;
                if !text.trim().is_empty() {
                    note = Some(text);
                }
            }
            _ => {}
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| AppError::validation("No file part in the request"))?;

    Ok((file_name, data, note))
}
