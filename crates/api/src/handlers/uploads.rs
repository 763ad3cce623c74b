//! Handler for filmmaker media uploads.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use reelhouse_core::error::CoreError;
use reelhouse_core::upload::{self, UploadBucket};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for a stored upload.
#[derive(Debug, Serialize)]
pub struct UploadedObject {
    /// Public URL the stored object is served from.
    pub url: String,
    /// Object key within the bucket.
    pub key: String,
}

/// POST /api/v1/uploads/{bucket}
///
/// Accepts one multipart field named `file`. Bucket-specific size and
/// content-type limits are enforced before the object store is touched.
pub async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    Path(bucket): Path<String>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadedObject>>)> {
    let bucket = UploadBucket::from_name(&bucket).map_err(AppError::Core)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::BadRequest("Upload is missing a content type".into()))?
            .to_string();
        bucket.validate_content_type(&content_type)?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        bucket.validate_size(bytes.len() as u64)?;

        let key = upload::object_key(user.user_id, Utc::now().timestamp_millis(), &file_name);
        let url = state
            .object_store
            .put(bucket, &key, &bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Object store error: {e}")))?;

        tracing::info!(
            user_id = user.user_id,
            bucket = bucket.name(),
            %key,
            size = bytes.len(),
            "upload stored"
        );

        return Ok((
            StatusCode::CREATED,
            Json(DataResponse {
                data: UploadedObject { url, key },
            }),
        ));
    }

    Err(AppError::Core(CoreError::Validation(
        "Multipart field 'file' is required".into(),
    )))
}
