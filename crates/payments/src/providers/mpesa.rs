//! M-Pesa payment path: announce the STK push, then settle. Simulated.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::notice::Notice;
use crate::provider::{
    simulated_delay, PaymentError, PaymentProvider, PaymentRequest, ProviderDisposition,
    ProviderFlow,
};

/// Simulated time for the buyer to approve the STK push.
pub const MPESA_SETTLE_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Default)]
pub struct MpesaPay;

#[async_trait]
impl PaymentProvider for MpesaPay {
    async fn initiate(
        &self,
        request: &PaymentRequest,
        cancel: &CancellationToken,
    ) -> Result<ProviderFlow, PaymentError> {
        let mut notices = vec![Notice::info(
            "M-Pesa Payment",
            "You will receive an STK push to complete payment.",
        )];

        simulated_delay(MPESA_SETTLE_DELAY, cancel).await?;

        notices.push(Notice::success(
            "Payment Successful!",
            format!("You now have access to \"{}\".", request.film_title),
        ));
        Ok(ProviderFlow {
            notices,
            disposition: ProviderDisposition::Settled,
        })
    }
}
