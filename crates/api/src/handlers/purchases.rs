//! Handlers for checkout and the `/purchases` resource.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use reelhouse_core::error::CoreError;
use reelhouse_core::film::FilmStatus;
use reelhouse_core::purchase::PaymentMethod;
use reelhouse_core::types::DbId;
use reelhouse_db::models::purchase::Purchase;
use reelhouse_db::repositories::{FilmRepo, PurchaseRepo};
use reelhouse_notify::DomainEvent;
use reelhouse_payments::{
    Checkout, CheckoutDisposition, CheckoutError, CheckoutOutcome, FilmSummary, Notice,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::stores::{DbDistributorResolver, DbPurchaseStore};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /films/{id}/checkout`.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// One of `wallet`, `custodial`, `mpesa`.
    pub method: String,
    /// Optional distributor referral code.
    pub distributor_code: Option<String>,
}

/// How the checkout attempt ended, as reported to the client.
#[derive(Debug, Serialize)]
pub struct CheckoutResult {
    /// The pending purchase row, when one was recorded.
    pub purchase_id: Option<DbId>,
    /// `completed`, `wallet_missing`, or `failed`.
    pub disposition: &'static str,
    /// Wallet install page, on the `wallet_missing` path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_url: Option<String>,
    /// User-facing notices in the order they occurred.
    pub notices: Vec<Notice>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/films/{id}/checkout
///
/// Record a pending purchase for the chosen payment method and walk its
/// simulated completion path. Guard rejections (unknown method, missing or
/// unpublished film) are HTTP errors; post-guard failures degrade to a
/// `failed` disposition with notices, mirroring a dialog that stays open.
pub async fn checkout(
    State(state): State<AppState>,
    user: AuthUser,
    Path(film_id): Path<DbId>,
    Json(input): Json<CheckoutRequest>,
) -> AppResult<Json<DataResponse<CheckoutResult>>> {
    let method = PaymentMethod::from_name(&input.method).map_err(AppError::Core)?;

    let film = FilmRepo::find_by_id(&state.pool, film_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Film",
            id: film_id,
        }))?;

    if film.status != FilmStatus::Published.name() {
        return Err(AppError::Core(CoreError::Validation(
            "Film is not available for purchase".into(),
        )));
    }

    let mut checkout = Checkout::new(
        Arc::new(DbPurchaseStore::new(state.pool.clone())),
        Arc::new(DbDistributorResolver::new(state.pool.clone())),
        (*state.providers).clone(),
        FilmSummary {
            id: film.id,
            title: film.title.clone(),
            selling_price: film.selling_price,
            currency: film.currency.clone(),
            poster_url: Some(film.poster_url.clone()),
        },
        Some(user.user_id),
        input.distributor_code,
    );

    let result = match checkout.select_method(method).await {
        Ok(outcome) => {
            publish_purchase_events(&state, &outcome, film.id, user.user_id, method);
            match outcome.disposition {
                CheckoutDisposition::Completed => CheckoutResult {
                    purchase_id: Some(outcome.purchase_id),
                    disposition: "completed",
                    install_url: None,
                    notices: outcome.notices,
                },
                CheckoutDisposition::WalletMissing { install_url } => CheckoutResult {
                    purchase_id: Some(outcome.purchase_id),
                    disposition: "wallet_missing",
                    install_url: Some(install_url),
                    notices: outcome.notices,
                },
            }
        }
        // Guard rejections become HTTP errors before anything was inserted.
        Err(CheckoutError::Core(err)) => return Err(AppError::Core(err)),
        // Everything after the guards degrades to a notice; the dialog
        // stays open and idle.
        Err(err) => CheckoutResult {
            purchase_id: None,
            disposition: "failed",
            install_url: None,
            notices: vec![Notice::error("Payment Failed", err.user_message())],
        },
    };

    Ok(Json(DataResponse { data: result }))
}

/// GET /api/v1/purchases
///
/// The caller's purchases, newest first.
pub async fn list_purchases(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Purchase>>>> {
    let purchases = PurchaseRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: purchases }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Publish the events for a recorded purchase intent.
fn publish_purchase_events(
    state: &AppState,
    outcome: &CheckoutOutcome,
    film_id: DbId,
    user_id: DbId,
    method: PaymentMethod,
) {
    state.event_bus.publish(
        DomainEvent::new("purchase.pending")
            .with_source("purchase", outcome.purchase_id)
            .with_actor(user_id)
            .with_payload(serde_json::json!({
                "film_id": film_id,
                "payment_method": method.name(),
            })),
    );

    if outcome.disposition == CheckoutDisposition::Completed {
        state.event_bus.publish(
            DomainEvent::new("purchase.settled")
                .with_source("purchase", outcome.purchase_id)
                .with_actor(user_id),
        );
    }
}
