//! Route definitions for distributor applications and referral tokens.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::distributors;
use crate::state::AppState;

/// Routes mounted at `/distributors`.
///
/// ```text
/// POST /apply -> partnership application (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/apply", post(distributors::apply))
}

/// Routes mounted at `/distribution-tokens`.
///
/// ```text
/// GET /{code}/films/{film_id} -> referral code validity
/// ```
pub fn token_router() -> Router<AppState> {
    Router::new().route("/{code}/films/{film_id}", get(distributors::validate_token))
}
