//! Custodial wallet payment path: create a platform-managed wallet, then
//! settle. Both steps are simulated.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::notice::Notice;
use crate::provider::{
    simulated_delay, PaymentError, PaymentProvider, PaymentRequest, ProviderDisposition,
    ProviderFlow,
};

/// Simulated custodial wallet creation time.
pub const CUSTODIAL_SETUP_DELAY: Duration = Duration::from_secs(2);

/// Simulated settlement time once the wallet exists.
pub const CUSTODIAL_SETTLE_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Default)]
pub struct CustodialPay;

#[async_trait]
impl PaymentProvider for CustodialPay {
    async fn initiate(
        &self,
        request: &PaymentRequest,
        cancel: &CancellationToken,
    ) -> Result<ProviderFlow, PaymentError> {
        let mut notices = vec![Notice::info(
            "Creating Your Wallet...",
            "Setting up a secure custodial wallet for you.",
        )];

        simulated_delay(CUSTODIAL_SETUP_DELAY, cancel).await?;

        notices.push(Notice::info(
            "Wallet Created!",
            "Your secure wallet is ready. Processing payment...",
        ));

        simulated_delay(CUSTODIAL_SETTLE_DELAY, cancel).await?;

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
