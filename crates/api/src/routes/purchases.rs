//! Route definitions for the `/purchases` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::purchases;
use crate::state::AppState;

/// Routes mounted at `/purchases`.
///
/// ```text
/// GET / -> caller's purchases (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(purchases::list_purchases))
}
