//! Purchase entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use reelhouse_core::types::{DbId, Timestamp};

/// A purchase row from the `purchases` table.
///
/// Rows are created in `pending` status when a buyer picks a payment
/// method. The amount is copied from the film's selling price at insert
/// time, never supplied by the caller.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Purchase {
    pub id: DbId,
    pub user_id: DbId,
    pub film_id: DbId,
    /// Referring distributor, when a valid referral token was presented.
    pub distributor_id: Option<DbId>,
    pub amount: f64,
    pub currency: String,
    /// `wallet`, `custodial`, or `mpesa`.
    pub payment_method: String,
    /// `pending`, `completed`, or `failed` (app-defined strings).
    pub status: String,
    pub transaction_hash: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a pending purchase.
#[derive(Debug, Clone)]
pub struct CreatePurchase {
    pub user_id: DbId,
    pub film_id: DbId,
    pub distributor_id: Option<DbId>,
    pub amount: f64,
    pub currency: String,
    pub payment_method: String,
}
