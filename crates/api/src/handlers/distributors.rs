//! Handlers for distributor applications and referral token checks.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use reelhouse_core::distributor::ApplicationDraft;
use reelhouse_core::types::DbId;
use reelhouse_db::models::distributor_application::{
    CreateDistributorApplication, DistributorApplication,
};
use reelhouse_db::repositories::{DistributionTokenRepo, DistributorApplicationRepo};
use reelhouse_notify::{ApplicationNotification, DomainEvent};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /distributors/apply`.
#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
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

/// Response body for the token validity check.
#[derive(Debug, Serialize)]
pub struct TokenCheck {
    pub valid: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/distributors/apply
///
/// Validate and record a distributor application, then notify the review
/// inbox. Validation failures reach neither the database nor the mailer;
/// a mail failure never fails the submission.
pub async fn apply(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ApplyRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<DistributorApplication>>)> {
    ApplicationDraft {
        full_name: &input.full_name,
        email: &input.email,
        distribution_plan: &input.distribution_plan,
        target_films: &input.target_films,
        target_customers: input.target_customers,
        timeline_months: input.timeline_months,
        experience: input.experience.as_deref(),
        portfolio_url: input.portfolio_url.as_deref(),
    }
    .validate()?;

    let created = DistributorApplicationRepo::create(
        &state.pool,
        &CreateDistributorApplication {
            user_id: user.user_id,
            full_name: input.full_name,
            email: input.email,
            phone: input.phone,
            portfolio_url: input.portfolio_url,
            distribution_plan: input.distribution_plan,
            target_films: input.target_films,
            target_customers: input.target_customers,
            timeline_months: input.timeline_months,
            experience: input.experience,
            social_media_links: input.social_media_links,
            additional_info: input.additional_info,
        },
    )
    .await?;

    state.event_bus.publish(
        DomainEvent::new("application.submitted")
            .with_source("distributor_application", created.id)
            .with_actor(user.user_id),
    );

    notify_review_inbox(&state, &created).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/distribution-tokens/{code}/films/{film_id}
///
/// Check whether a referral code is valid for a film.
pub async fn validate_token(
    State(state): State<AppState>,
    Path((code, film_id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<TokenCheck>>> {
    let valid = DistributionTokenRepo::validate(&state.pool, film_id, &code).await?;
    Ok(Json(DataResponse {
        data: TokenCheck { valid },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Send the application notification email. Never fails the submission:
/// delivery problems (or missing SMTP config) only log.
async fn notify_review_inbox(state: &AppState, application: &DistributorApplication) {
    let Some(mailer) = &state.mailer else {
        tracing::debug!("email delivery not configured; skipping application notification");
        return;
    };

    let notification = ApplicationNotification {
        full_name: application.full_name.clone(),
        email: application.email.clone(),
        phone: application.phone.clone(),
        portfolio_url: application.portfolio_url.clone(),
        distribution_plan: application.distribution_plan.clone(),
        target_films: application.target_films.clone(),
        target_customers: application.target_customers,
        timeline_months: application.timeline_months,
        experience: application.experience.clone(),
        social_media_links: application.social_media_links.clone(),
        additional_info: application.additional_info.clone(),
    };

    if let Err(err) = mailer.deliver_application(&notification).await {
        tracing::warn!(
            application_id = application.id,
            error = %err,
            "application notification email failed (submission unaffected)"
        );
    }
}
