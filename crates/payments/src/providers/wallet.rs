//! Self-hosted wallet payment path.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use reelhouse_core::wallet::TARGET_CHAIN_NAME;

use crate::notice::Notice;
use crate::provider::{
    simulated_delay, PaymentError, PaymentProvider, PaymentRequest, ProviderDisposition,
    ProviderFlow,
};
use crate::wallet::{ConnectOutcome, WalletConnector, WalletError, WalletProvider};

/// Simulated on-chain settlement time after the wallet connects.
pub const WALLET_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Pays by connecting a browser wallet, then simulating settlement.
///
/// Provider absence is a handled outcome, not an error: the flow reports
/// the install page and the attempt counts as cancelled.
pub struct WalletPay<P> {
    connector: Mutex<WalletConnector<P>>,
}

impl<P: WalletProvider> WalletPay<P> {
    pub fn new(provider: P) -> Self {
        Self {
            connector: Mutex::new(WalletConnector::new(provider)),
        }
    }
}

#[async_trait]
impl<P: WalletProvider> PaymentProvider for WalletPay<P> {
    async fn initiate(
        &self,
        request: &PaymentRequest,
        cancel: &CancellationToken,
    ) -> Result<ProviderFlow, PaymentError> {
        let mut connector = self.connector.lock().await;

        match connector.connect().await {
            Ok(ConnectOutcome::InstallRequired { install_url }) => Ok(ProviderFlow {
                notices: vec![Notice::info(
                    "No Wallet Detected",
                    "Please install a wallet like Coinbase Wallet or MetaMask.",
                )],
                disposition: ProviderDisposition::WalletMissing {
                    install_url: install_url.to_string(),
                },
            }),
            Ok(ConnectOutcome::Connected { address }) => {
                tracing::debug!(%address, "wallet connected for payment");
                let mut notices = vec![Notice::info(
                    "Wallet Connected!",
                    format!("Processing your payment on {TARGET_CHAIN_NAME} network..."),
                )];
                drop(connector);

                simulated_delay(WALLET_SETTLE_DELAY, cancel).await?;

                notices.push(Notice::success(
                    "Payment Successful!",
                    format!("You now have access to \"{}\".", request.film_title),
                ));
                Ok(ProviderFlow {
                    notices,
                    disposition: ProviderDisposition::Settled,
                })
            }
            Err(WalletError::Rejected) => {
                Err(PaymentError::Rejected("Wallet connection failed".into()))
            }
            Err(err) => Err(PaymentError::Provider(err.to_string())),
        }
    }
}
