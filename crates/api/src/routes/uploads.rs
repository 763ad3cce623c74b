//! Route definitions for the `/uploads` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use reelhouse_core::upload::MAX_TRAILER_BYTES;

use crate::handlers::uploads;
use crate::state::AppState;

/// Multipart framing overhead allowed on top of the largest bucket cap.
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Routes mounted at `/uploads`.
///
/// The body limit admits the largest bucket (trailers) plus framing; the
/// handler still enforces the per-bucket caps before storage.
///
/// ```text
/// POST /{bucket} -> multipart media upload (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{bucket}", post(uploads::upload)).layer(
        DefaultBodyLimit::max((MAX_TRAILER_BYTES + MULTIPART_OVERHEAD_BYTES) as usize),
    )
}
