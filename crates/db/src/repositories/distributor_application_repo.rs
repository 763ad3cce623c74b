//! Repository for the `distributor_applications` table.

use sqlx::PgPool;

use reelhouse_core::distributor::ApplicationStatus;
use reelhouse_core::types::DbId;

use crate::models::distributor_application::{
    CreateDistributorApplication, DistributorApplication,
};

const COLUMNS: &str = "id, user_id, full_name, email, phone, portfolio_url, \
                        distribution_plan, target_films, target_customers, timeline_months, \
                        experience, social_media_links, additional_info, status, \
                        created_at, updated_at";

/// Provides CRUD operations for distributor applications.
pub struct DistributorApplicationRepo;

impl DistributorApplicationRepo {
    /// Insert a new application in `pending` status, returning the row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDistributorApplication,
    ) -> Result<DistributorApplication, sqlx::Error> {
        let query = format!(
            "INSERT INTO distributor_applications
                (user_id, full_name, email, phone, portfolio_url, distribution_plan,
                 target_films, target_customers, timeline_months, experience,
                 social_media_links, additional_info, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DistributorApplication>(&query)
            .bind(input.user_id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.portfolio_url)
            .bind(&input.distribution_plan)
            .bind(&input.target_films)
            .bind(input.target_customers)
            .bind(input.timeline_months)
            .bind(&input.experience)
            .bind(&input.social_media_links)
            .bind(&input.additional_info)
            .bind(ApplicationStatus::Pending.name())
            .fetch_one(pool)
            .await
    }

    /// Find an application by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DistributorApplication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM distributor_applications WHERE id = $1");
        sqlx::query_as::<_, DistributorApplication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all applications, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<DistributorApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM distributor_applications ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, DistributorApplication>(&query)
            .fetch_all(pool)
            .await
    }
}
