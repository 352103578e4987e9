//! Multipart helpers for the upload mutation

use std::io;

use axum::extract::multipart::{Field, MultipartError};
use axum::http::StatusCode;
use filedrop_core::constants::{DEFAULT_MIMETYPE, DEFAULT_TRANSFER_ENCODING, UPLOAD_FIELD_NAME};
use filedrop_core::AppError;
use filedrop_processing::UploadRequest;
use filedrop_storage::UploadReader;
use futures::TryStreamExt;
use tokio_util::io::StreamReader;

use crate::error::HttpAppError;

const CONTENT_TRANSFER_ENCODING: &str = "content-transfer-encoding";

/// Whether this part carries the uploaded file.
pub fn is_file_field(field: &Field<'_>) -> bool {
    field.name() == Some(UPLOAD_FIELD_NAME)
}

/// Error for a multipart body that ended without a `file` part.
pub fn missing_file_part() -> HttpAppError {
    AppError::InvalidInput(format!(
        "No file provided; send one multipart part named '{}'",
        UPLOAD_FIELD_NAME
    ))
    .into()
}

/// Whether the multipart reader stopped because the request body limit was hit.
fn hit_body_limit(err: &MultipartError) -> bool {
    err.status() == StatusCode::PAYLOAD_TOO_LARGE
}

/// Error for a multipart body that broke before the file part was reached.
///
/// Running into the request body limit is reported as the upload being too
/// large, matching what the pipeline reports once the file is streaming.
pub fn multipart_failure(err: MultipartError, limit: Option<u64>) -> HttpAppError {
    match limit {
        Some(limit) if hit_body_limit(&err) => AppError::PayloadTooLarge { limit }.into(),
        _ => err.into(),
    }
}

/// Source error for the file body. The body limit surfaces as `FileTooLarge`
/// so storage reports `PayloadTooLarge` rather than a broken stream.
fn body_read_error(err: MultipartError) -> io::Error {
    if hit_body_limit(&err) {
        io::Error::new(io::ErrorKind::FileTooLarge, err)
    } else {
        io::Error::other(err)
    }
}

/// Turn the file part into a pipeline request without buffering its body.
pub fn upload_request_from_field(field: Field<'_>) -> Result<UploadRequest<'_>, HttpAppError> {
    let filename = field
        .file_name()
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::InvalidInput(format!(
                "The '{}' part must carry a filename",
                UPLOAD_FIELD_NAME
            ))
        })?;

    let mimetype = field
        .content_type()
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_MIMETYPE.to_string());

    let encoding = field
        .headers()
        .get(CONTENT_TRANSFER_ENCODING)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_TRANSFER_ENCODING.to_string());

    let body = field.map_err(body_read_error);
    let reader: UploadReader<'_> = Box::pin(StreamReader::new(body));

    Ok(UploadRequest::new(filename, mimetype, encoding, reader))
}
