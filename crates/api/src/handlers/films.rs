//! Handlers for the `/films` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use reelhouse_core::error::CoreError;
use reelhouse_core::film::{self, FilmStatus, DEFAULT_CURRENCY};
use reelhouse_core::types::DbId;
use reelhouse_db::models::film::{CreateFilm, Film, UpdateFilm};
use reelhouse_db::repositories::FilmRepo;
use reelhouse_notify::DomainEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /films` (filmmaker submission).
#[derive(Debug, Deserialize)]
pub struct SubmitFilmRequest {
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<String>,
    pub poster_url: String,
    pub trailer_url: Option<String>,
    pub film_url: String,
    pub selling_price: f64,
    pub currency: Option<String>,
}

/// Request body for `PUT /films/{id}`. All fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateFilmRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<String>,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
    pub selling_price: Option<f64>,
    pub currency: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/films
///
/// Submit a new film. Validation runs before any insert; submissions always
/// start as drafts owned by the caller.
pub async fn submit_film(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SubmitFilmRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Film>>)> {
    film::validate_title(&input.title)?;
    film::validate_selling_price(input.selling_price)?;
    let currency = input
        .currency
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
    film::validate_currency(&currency)?;

    if input.poster_url.trim().is_empty() || input.film_url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Poster and film content references are required".into(),
        )));
    }

    let created = FilmRepo::create(
        &state.pool,
        &CreateFilm {
            user_id: user.user_id,
            title: input.title,
            description: input.description,
            genre: input.genre,
            duration: input.duration,
            poster_url: input.poster_url,
            trailer_url: input.trailer_url,
            film_url: input.film_url,
            selling_price: input.selling_price,
            currency,
        },
    )
    .await?;

    state.event_bus.publish(
        DomainEvent::new("film.submitted")
            .with_source("film", created.id)
            .with_actor(user.user_id),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/films
///
/// The public browse feed: published films, newest first.
pub async fn list_published(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Film>>>> {
    let films = FilmRepo::list_published(&state.pool).await?;
    Ok(Json(DataResponse { data: films }))
}

/// GET /api/v1/films/mine
///
/// The caller's own films, drafts included.
pub async fn my_films(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Film>>>> {
    let films = FilmRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: films }))
}

/// GET /api/v1/films/{id}
///
/// Drafts are not exposed publicly; they 404 like missing rows.
pub async fn get_film(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Film>>> {
    let film = FilmRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|film| film.status == FilmStatus::Published.name())
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Film", id }))?;
    Ok(Json(DataResponse { data: film }))
}

/// PUT /api/v1/films/{id}
///
/// Owner-only partial update.
pub async fn update_film(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFilmRequest>,
) -> AppResult<Json<DataResponse<Film>>> {
    if let Some(title) = &input.title {
        film::validate_title(title)?;
    }
    if let Some(price) = input.selling_price {
        film::validate_selling_price(price)?;
    }
    if let Some(currency) = &input.currency {
        film::validate_currency(currency)?;
    }

    let updated = FilmRepo::update(
        &state.pool,
        id,
        user.user_id,
        &UpdateFilm {
            title: input.title,
            description: input.description,
            genre: input.genre,
            duration: input.duration,
            poster_url: input.poster_url,
            trailer_url: input.trailer_url,
            selling_price: input.selling_price,
            currency: input.currency,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "Film", id }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/films/{id}/publish
///
/// Owner-only transition from draft to published.
pub async fn publish_film(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Film>>> {
    let published = FilmRepo::publish(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Film", id }))?;

    state.event_bus.publish(
        DomainEvent::new("film.published")
            .with_source("film", published.id)
            .with_actor(user.user_id),
    );

    Ok(Json(DataResponse { data: published }))
}
