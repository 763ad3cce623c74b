pub mod auth;
pub mod distributors;
pub mod films;
pub mod health;
pub mod purchases;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                 signup (public)
/// /auth/login                                  login (public)
/// /auth/refresh                                refresh (public)
/// /auth/logout                                 logout (requires auth)
///
/// /films                                       list published, submit
/// /films/mine                                  caller's films incl. drafts
/// /films/{id}                                  get, update (owner)
/// /films/{id}/publish                          publish (owner, POST)
/// /films/{id}/checkout                         purchase checkout (POST)
///
/// /purchases                                   caller's purchases
///
/// /distributors/apply                          partnership application (POST)
/// /distribution-tokens/{code}/films/{film_id}  referral code validity
///
/// /uploads/{bucket}                            multipart media upload (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/films", films::router())
        .nest("/purchases", purchases::router())
        .nest("/distributors", distributors::router())
        .nest("/distribution-tokens", distributors::token_router())
        .nest("/uploads", uploads::router())
}
