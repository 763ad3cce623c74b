//! Repository for the `purchases` table.

use sqlx::PgPool;

use reelhouse_core::purchase::PurchaseStatus;
use reelhouse_core::types::DbId;

use crate::models::purchase::{CreatePurchase, Purchase};

const COLUMNS: &str = "id, user_id, film_id, distributor_id, amount, currency, \
                        payment_method, status, transaction_hash, created_at, updated_at";

/// Provides CRUD operations for purchases.
pub struct PurchaseRepo;

impl PurchaseRepo {
    /// Insert a purchase in `pending` status, returning the created row.
    pub async fn create_pending(
        pool: &PgPool,
        input: &CreatePurchase,
    ) -> Result<Purchase, sqlx::Error> {
        let query = format!(
            "INSERT INTO purchases (user_id, film_id, distributor_id, amount, currency,
                                    payment_method, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(input.user_id)
            .bind(input.film_id)
            .bind(input.distributor_id)
            .bind(input.amount)
            .bind(&input.currency)
            .bind(&input.payment_method)
            .bind(PurchaseStatus::Pending.name())
            .fetch_one(pool)
            .await
    }

    /// Find a purchase by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Purchase>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM purchases WHERE id = $1");
        sqlx::query_as::<_, Purchase>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a buyer's purchases, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Purchase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM purchases WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
