//! Route definitions for the `/films` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{films, purchases};
use crate::state::AppState;

/// Routes mounted at `/films`.
///
/// ```text
/// GET  /               -> public browse feed (published films)
/// POST /               -> submit film (auth)
/// GET  /mine           -> caller's films (auth)
/// GET  /{id}           -> published film detail
/// PUT  /{id}           -> owner update (auth)
/// POST /{id}/publish   -> owner publish (auth)
/// POST /{id}/checkout  -> purchase checkout (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(films::list_published).post(films::submit_film))
        .route("/mine", get(films::my_films))
        .route("/{id}", get(films::get_film).put(films::update_film))
        .route("/{id}/publish", post(films::publish_film))
        .route("/{id}/checkout", post(purchases::checkout))
}
