//! Persistence seams consumed by the checkout workflow.
//!
//! The workflow never talks to the database directly: it sees these two
//! traits. The API crate implements them over sqlx repositories; tests use
//! in-memory fakes.

use async_trait::async_trait;

use reelhouse_core::purchase::PaymentMethod;
use reelhouse_core::types::DbId;

/// A persistence failure whose message is surfaced to the user verbatim.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Input for recording a pending purchase.
///
/// The amount is the film's selling price at the moment of selection; the
/// workflow fills it in and callers of the store never get to choose it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchase {
    pub user_id: DbId,
    pub film_id: DbId,
    pub distributor_id: Option<DbId>,
    pub amount: f64,
    pub currency: String,
    pub method: PaymentMethod,
}

/// The row the store created.
#[derive(Debug, Clone, Copy)]
pub struct PendingPurchase {
    pub id: DbId,
}

/// Records purchase intents.
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// Insert one purchase row in `pending` status.
    async fn create_pending(&self, purchase: NewPurchase) -> Result<PendingPurchase, StoreError>;
}

/// Resolves a distributor referral code for one film.
#[async_trait]
pub trait DistributorResolver: Send + Sync {
    /// `Some(distributor_id)` when an active token with this code exists
    /// for the film; `None` otherwise.
    async fn resolve(&self, film_id: DbId, token_code: &str) -> Result<Option<DbId>, StoreError>;
}
