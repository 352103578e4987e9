use std::sync::Arc;

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    Json,
};
use filedrop_core::FileResponse;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{
    is_file_field, missing_file_part, multipart_failure, upload_request_from_field,
};

/// List uploads
///
/// Storage names of every upload completed since the process started, in
/// completion order.
#[utoipa::path(
    get,
    path = "/api/v0/uploads",
    tag = "uploads",
    responses(
        (status = 200, description = "Stored upload names", body = Vec<String>)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_uploads"))]
pub async fn list_uploads(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let uploads = state.pipeline.list_uploads().await;
    tracing::debug!(count = uploads.len(), "Listing uploads");
    Json(uploads)
}

/// Upload file handler
///
/// Streams the first multipart part named `file` to the uploads directory.
/// The body is never buffered whole; parts after the file are not read.
///
/// # Errors
/// - `UnsupportedFileType` (415) - extension not accepted
/// - `PayloadTooLarge` (413) - file, or the body around it, exceeds the limit
/// - `StreamFailed` (400) - request body ended or broke mid-file
/// - `DestinationUnavailable` (503) - the uploads directory cannot be written
/// - `InvalidInput` (400) - not multipart, or no `file` part
#[utoipa::path(
    post,
    path = "/api/v0/uploads",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = FileResponse),
        (status = 400, description = "Invalid input or interrupted stream", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Unsupported file type", body = ErrorResponse),
        (status = 503, description = "Upload destination unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<FileResponse>, HttpAppError> {
    let mut multipart = multipart?;
    let limit = state.config.max_upload_size_bytes();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_failure(e, limit))?
    {
        if !is_file_field(&field) {
            tracing::debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let request = upload_request_from_field(field)?;
        let stored = state.pipeline.upload_file(request).await?;
        return Ok(Json(FileResponse::from(stored)));
    }

    Err(missing_file_part())
}
