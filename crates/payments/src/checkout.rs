//! Checkout orchestration: one instance per open purchase dialog.

use std::collections::HashMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use reelhouse_core::error::CoreError;
use reelhouse_core::film;
use reelhouse_core::purchase::{FlowState, PaymentMethod, PurchaseFlow};
use reelhouse_core::types::DbId;

use crate::notice::Notice;
use crate::provider::{PaymentError, PaymentProvider, PaymentRequest, ProviderDisposition};
use crate::store::{DistributorResolver, NewPurchase, PurchaseStore, StoreError};

/// What the checkout needs to know about the film being bought.
#[derive(Debug, Clone)]
pub struct FilmSummary {
    pub id: DbId,
    pub title: String,
    pub selling_price: f64,
    pub currency: String,
    pub poster_url: Option<String>,
}

/// Method id → provider. Wired with the simulated providers in production
/// and with fakes in tests.
pub type ProviderMap = HashMap<PaymentMethod, Arc<dyn PaymentProvider>>;

/// How a completed selection left the checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutDisposition {
    /// Settled (simulated); the dialog should close.
    Completed,
    /// No wallet provider; open the install page. The attempt counted as
    /// cancelled -- a retry needs a fresh method selection.
    WalletMissing { install_url: String },
}

/// The result of one method selection.
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    /// The pending purchase row created for this attempt.
    pub purchase_id: DbId,
    /// User-facing notices, in order.
    pub notices: Vec<Notice>,
    pub disposition: CheckoutDisposition,
}

/// Failure taxonomy of a method selection.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// Guard rejection (not signed in, attempt already in flight, bad film).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The pending-purchase insert failed; the message is the store's,
    /// surfaced verbatim. The dialog stays interactable.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// The provider path failed after the row was inserted.
    #[error("{0}")]
    Payment(PaymentError),

    /// The checkout was closed mid-attempt; no further effects happened.
    #[error("Checkout cancelled")]
    Cancelled,
}

impl CheckoutError {
    /// Body for the "Payment Failed" notice.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::Core(err) => err.to_string(),
            CheckoutError::Store(err) => err.to_string(),
            CheckoutError::Payment(err) => err.to_string(),
            CheckoutError::Cancelled => "The payment attempt was cancelled.".into(),
        }
    }
}

/// One purchase dialog's workflow.
///
/// Holds the dialog-scoped state machine and a cancellation token covering
/// the instance's lifetime. Collaborators are injected so tests can run the
/// whole flow against fakes.
pub struct Checkout {
    store: Arc<dyn PurchaseStore>,
    resolver: Arc<dyn DistributorResolver>,
    providers: ProviderMap,
    film: FilmSummary,
    user_id: Option<DbId>,
    distributor_code: Option<String>,
    flow: PurchaseFlow,
    cancel: CancellationToken,
}

impl Checkout {
    pub fn new(
        store: Arc<dyn PurchaseStore>,
        resolver: Arc<dyn DistributorResolver>,
        providers: ProviderMap,
        film: FilmSummary,
        user_id: Option<DbId>,
        distributor_code: Option<String>,
    ) -> Self {
        Self {
            store,
            resolver,
            providers,
            film,
            user_id,
            distributor_code,
            flow: PurchaseFlow::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Token covering this checkout's lifetime. Cancelled by [`close`].
    ///
    /// [`close`]: Checkout::close
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn flow_state(&self) -> &FlowState {
        self.flow.state()
    }

    /// Close the dialog: cancel any in-flight attempt and return to idle.
    pub fn close(&mut self) {
        self.cancel.cancel();
        self.flow.reset();
    }

    /// Handle the user picking a payment method.
    ///
    /// Exactly one pending purchase row is inserted per accepted selection,
    /// before the provider path runs. Guard rejections insert nothing.
    pub async fn select_method(
        &mut self,
        method: PaymentMethod,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        film::validate_selling_price(self.film.selling_price)?;
        self.flow.begin(method, self.user_id.is_some())?;
        let user_id = self
            .user_id
            .ok_or_else(|| CoreError::Internal("flow began without a user".into()))?;

        let distributor_id = self.resolve_distributor().await;

        let pending = match self
            .store
            .create_pending(NewPurchase {
                user_id,
                film_id: self.film.id,
                distributor_id,
                amount: self.film.selling_price,
                currency: self.film.currency.clone(),
                method,
            })
            .await
        {
            Ok(pending) => pending,
            Err(err) => {
                self.flow.fail(err.to_string())?;
                self.flow.reset();
                return Err(err.into());
            }
        };

        tracing::info!(
            purchase_id = pending.id,
            film_id = self.film.id,
            method = method.name(),
            amount = self.film.selling_price,
            currency = %self.film.currency,
            "pending purchase recorded"
        );

        let provider = match self.providers.get(&method) {
            Some(provider) => Arc::clone(provider),
            None => {
                self.flow.reset();
                return Err(CoreError::Internal(format!(
                    "no provider registered for method '{}'",
                    method.name()
                ))
                .into());
            }
        };

        let request = PaymentRequest {
            film_title: self.film.title.clone(),
            amount: self.film.selling_price,
            currency: self.film.currency.clone(),
        };
        let cancel = self.cancel.clone();

        match provider.initiate(&request, &cancel).await {
            Ok(result) => match result.disposition {
                ProviderDisposition::Settled => {
                    self.flow.succeed()?;
                    Ok(CheckoutOutcome {
                        purchase_id: pending.id,
                        notices: result.notices,
                        disposition: CheckoutDisposition::Completed,
                    })
                }
                ProviderDisposition::WalletMissing { install_url } => {
                    // Not terminal: the attempt counts as cancelled and a
                    // retry requires a fresh selection.
                    self.flow.reset();
                    Ok(CheckoutOutcome {
                        purchase_id: pending.id,
                        notices: result.notices,
                        disposition: CheckoutDisposition::WalletMissing { install_url },
                    })
                }
            },
            Err(PaymentError::Cancelled) => {
                self.flow.reset();
                Err(CheckoutError::Cancelled)
            }
            Err(err) => {
                self.flow.fail(err.to_string())?;
                Err(CheckoutError::Payment(err))
            }
        }
    }

    /// Resolve the referral code, if any, to a distributor id.
    ///
    /// An invalid or unresolvable code never blocks the sale; the purchase
    /// simply proceeds without attribution.
    async fn resolve_distributor(&self) -> Option<DbId> {
        let code = self.distributor_code.as_deref()?.trim();
        if code.is_empty() {
            return None;
        }
        match self.resolver.resolve(self.film.id, code).await {
            Ok(Some(distributor_id)) => Some(distributor_id),
            Ok(None) => {
                tracing::warn!(
                    film_id = self.film.id,
                    code,
                    "referral code did not resolve to an active token; proceeding unattributed"
                );
                None
            }
            Err(err) => {
                tracing::warn!(
                    film_id = self.film.id,
                    code,
                    error = %err,
                    "referral resolution failed; proceeding unattributed"
                );
                None
            }
        }
    }
}
