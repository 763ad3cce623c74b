//! Database-backed implementations of the checkout persistence seams.

use async_trait::async_trait;

use reelhouse_core::types::DbId;
use reelhouse_db::models::purchase::CreatePurchase;
use reelhouse_db::repositories::{DistributionTokenRepo, PurchaseRepo};
use reelhouse_db::DbPool;
use reelhouse_payments::{
    DistributorResolver, NewPurchase, PendingPurchase, PurchaseStore, StoreError,
};

/// Records pending purchases through [`PurchaseRepo`].
pub struct DbPurchaseStore {
    pool: DbPool,
}

impl DbPurchaseStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PurchaseStore for DbPurchaseStore {
    async fn create_pending(&self, purchase: NewPurchase) -> Result<PendingPurchase, StoreError> {
        let input = CreatePurchase {
            user_id: purchase.user_id,
            film_id: purchase.film_id,
            distributor_id: purchase.distributor_id,
            amount: purchase.amount,
            currency: purchase.currency,
            payment_method: purchase.method.name().to_string(),
        };
        let row = PurchaseRepo::create_pending(&self.pool, &input)
            .await
            .map_err(|err| StoreError(err.to_string()))?;
        Ok(PendingPurchase { id: row.id })
    }
}

/// Resolves referral codes through [`DistributionTokenRepo`].
pub struct DbDistributorResolver {
    pool: DbPool,
}

impl DbDistributorResolver {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DistributorResolver for DbDistributorResolver {
    async fn resolve(&self, film_id: DbId, token_code: &str) -> Result<Option<DbId>, StoreError> {
        DistributionTokenRepo::resolve_active_distributor(&self.pool, film_id, token_code)
            .await
            .map_err(|err| StoreError(err.to_string()))
    }
}
