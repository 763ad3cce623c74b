//! Film entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use reelhouse_core::types::{DbId, Timestamp};

/// A film row from the `films` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Film {
    pub id: DbId,
    /// Owning filmmaker.
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    /// Free-form runtime string, e.g. `"1h 42m"`.
    pub duration: Option<String>,
    pub poster_url: String,
    pub trailer_url: Option<String>,
    pub film_url: String,
    pub selling_price: f64,
    pub currency: String,
    /// `draft` or `published`.
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a filmmaker submission. Rows are always created as drafts.
#[derive(Debug)]
pub struct CreateFilm {
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<String>,
    pub poster_url: String,
    pub trailer_url: Option<String>,
    pub film_url: String,
    pub selling_price: f64,
    pub currency: String,
}

/// DTO for owner edits. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateFilm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<String>,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
    pub selling_price: Option<f64>,
    pub currency: Option<String>,
}
