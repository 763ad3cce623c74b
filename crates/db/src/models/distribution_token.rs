//! Distribution (referral) token model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use reelhouse_core::types::{DbId, Timestamp};

/// A referral token row from the `distribution_tokens` table.
///
/// A token ties a sale of one film to the distributor who referred it, for
/// commission attribution. Only active tokens resolve.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DistributionToken {
    pub id: DbId,
    pub distributor_id: DbId,
    pub film_id: DbId,
    /// The shareable code embedded in referral links.
    pub token_code: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for minting a new token.
#[derive(Debug)]
pub struct CreateDistributionToken {
    pub distributor_id: DbId,
    pub film_id: DbId,
    pub token_code: String,
}
