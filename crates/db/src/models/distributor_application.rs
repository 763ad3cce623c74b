//! Distributor partnership application model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use reelhouse_core::types::{DbId, Timestamp};

/// An application row from the `distributor_applications` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DistributorApplication {
    pub id: DbId,
    pub user_id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub portfolio_url: Option<String>,
    pub distribution_plan: String,
    /// Which films / catalog segments the applicant wants to carry.
    pub target_films: String,
    pub target_customers: i64,
    pub timeline_months: i32,
    pub experience: Option<String>,
    pub social_media_links: Option<String>,
    pub additional_info: Option<String>,
    /// `pending`, `approved`, or `rejected`.
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting an application. Rows start `pending`.
#[derive(Debug)]
pub struct CreateDistributorApplication {
    pub user_id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub portfolio_url: Option<String>,
    pub distribution_plan: String,
    pub target_films: String,
    pub target_customers: i64,
    pub timeline_months: i32,
    pub experience: Option<String>,
    pub social_media_links: Option<String>,
    pub additional_info: Option<String>,
}
