//! Repository for the `films` table.

use sqlx::PgPool;

use reelhouse_core::film::FilmStatus;
use reelhouse_core::types::DbId;

use crate::models::film::{CreateFilm, Film, UpdateFilm};

const COLUMNS: &str = "id, user_id, title, description, genre, duration, poster_url, \
                        trailer_url, film_url, selling_price, currency, status, \
                        created_at, updated_at";

/// Provides CRUD operations for films.
pub struct FilmRepo;

impl FilmRepo {
    /// Insert a new film submission as a draft, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFilm) -> Result<Film, sqlx::Error> {
        let query = format!(
            "INSERT INTO films (user_id, title, description, genre, duration, poster_url,
                                trailer_url, film_url, selling_price, currency, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.genre)
            .bind(&input.duration)
            .bind(&input.poster_url)
            .bind(&input.trailer_url)
            .bind(&input.film_url)
            .bind(input.selling_price)
            .bind(&input.currency)
            .bind(FilmStatus::Draft.name())
            .fetch_one(pool)
            .await
    }

    /// Find a film by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Film>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE id = $1");
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List published films, newest first. This is the public browse feed.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<Film>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM films WHERE status = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(FilmStatus::Published.name())
            .fetch_all(pool)
            .await
    }

    /// List every film owned by a user, newest first.
    pub async fn list_by_owner(pool: &PgPool, user_id: DbId) -> Result<Vec<Film>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM films WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a film. Only non-`None` fields in `input` are applied.
    ///
    /// Scoped to the owner: returns `None` when no row matches both the id
    /// and the owning user.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateFilm,
    ) -> Result<Option<Film>, sqlx::Error> {
        let query = format!(
            "UPDATE films SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                genre = COALESCE($5, genre),
                duration = COALESCE($6, duration),
                poster_url = COALESCE($7, poster_url),
                trailer_url = COALESCE($8, trailer_url),
                selling_price = COALESCE($9, selling_price),
                currency = COALESCE($10, currency)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.genre)
            .bind(&input.duration)
            .bind(&input.poster_url)
            .bind(&input.trailer_url)
            .bind(input.selling_price)
            .bind(&input.currency)
            .fetch_optional(pool)
            .await
    }

    /// Move an owner's film from draft to published.
    ///
    /// Returns `None` when the film does not exist or is not owned by
    /// `owner_id`.
    pub async fn publish(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Film>, sqlx::Error> {
        let query = format!(
            "UPDATE films SET status = $3
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(FilmStatus::Published.name())
            .fetch_optional(pool)
            .await
    }
}
