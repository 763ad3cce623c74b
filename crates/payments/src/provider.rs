//! The pluggable payment-provider seam.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::notice::Notice;

/// What a provider needs to know about the attempt it is settling.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub film_title: String,
    pub amount: f64,
    pub currency: String,
}

/// How a provider attempt ended, short of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderDisposition {
    /// The (simulated) settlement path ran to completion.
    Settled,
    /// No wallet provider is present; the caller should open the install
    /// page. Not a terminal state -- the attempt counts as cancelled.
    WalletMissing { install_url: String },
}

/// Notices produced along the way plus the final disposition.
#[derive(Debug, Clone)]
pub struct ProviderFlow {
    pub notices: Vec<Notice>,
    pub disposition: ProviderDisposition,
}

/// Failures while driving a provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PaymentError {
    /// The user declined a provider prompt (e.g. wallet account access).
    #[error("{0}")]
    Rejected(String),

    /// The checkout was cancelled (dialog closed) mid-attempt.
    #[error("Payment attempt cancelled")]
    Cancelled,

    /// Provider-internal failure.
    #[error("{0}")]
    Provider(String),
}

/// A payment rail the checkout can hand an attempt to.
///
/// Implementations must honor `cancel`: once it fires, stop and return
/// [`PaymentError::Cancelled`] instead of producing further effects. The
/// bundled implementations simulate settlement with fixed delays; real
/// integrations (on-chain payment, M-Pesa STK callbacks, custodial wallet
/// creation) implement the same trait.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn initiate(
        &self,
        request: &PaymentRequest,
        cancel: &CancellationToken,
    ) -> Result<ProviderFlow, PaymentError>;
}

/// Sleep for `delay`, racing cancellation.
pub(crate) async fn simulated_delay(
    delay: std::time::Duration,
    cancel: &CancellationToken,
) -> Result<(), PaymentError> {
    tokio::select! {
        () = cancel.cancelled() => Err(PaymentError::Cancelled),
        () = tokio::time::sleep(delay) => Ok(()),
    }
}
