//! Repository for the `distribution_tokens` table.

use sqlx::PgPool;

use reelhouse_core::types::DbId;

use crate::models::distribution_token::{CreateDistributionToken, DistributionToken};

const COLUMNS: &str = "id, distributor_id, film_id, token_code, is_active, \
                        created_at, updated_at";

/// Provides CRUD operations and referral resolution for distribution tokens.
pub struct DistributionTokenRepo;

impl DistributionTokenRepo {
    /// Mint a new token, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDistributionToken,
    ) -> Result<DistributionToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO distribution_tokens (distributor_id, film_id, token_code)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DistributionToken>(&query)
            .bind(input.distributor_id)
            .bind(input.film_id)
            .bind(&input.token_code)
            .fetch_one(pool)
            .await
    }

    /// Find a token by its shareable code.
    pub async fn find_by_code(
        pool: &PgPool,
        token_code: &str,
    ) -> Result<Option<DistributionToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM distribution_tokens WHERE token_code = $1");
        sqlx::query_as::<_, DistributionToken>(&query)
            .bind(token_code)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a referral code to its owning distributor for one film.
    ///
    /// Returns `None` unless an active token with that code exists for
    /// exactly that film. An invalid code never blocks a sale; callers log
    /// and proceed without attribution.
    pub async fn resolve_active_distributor(
        pool: &PgPool,
        film_id: DbId,
        token_code: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT distributor_id FROM distribution_tokens
             WHERE film_id = $1 AND token_code = $2 AND is_active = TRUE",
        )
        .bind(film_id)
        .bind(token_code)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(id,)| id))
    }

    /// Check whether a referral code is valid for a film.
    pub async fn validate(
        pool: &PgPool,
        film_id: DbId,
        token_code: &str,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM distribution_tokens
                 WHERE film_id = $1 AND token_code = $2 AND is_active = TRUE
             )",
        )
        .bind(film_id)
        .bind(token_code)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Deactivate a token. Returns `true` if a row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE distribution_tokens SET is_active = FALSE
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
