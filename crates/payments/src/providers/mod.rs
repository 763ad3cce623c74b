//! Bundled provider implementations.
//!
//! All three simulate settlement with fixed delays; they are placeholders
//! for the real rails and exist so the rest of the workflow is exercised
//! end to end.

pub mod custodial;
pub mod mpesa;
pub mod wallet;

pub use custodial::CustodialPay;
pub use mpesa::MpesaPay;
pub use wallet::WalletPay;

use std::sync::Arc;

use reelhouse_core::purchase::PaymentMethod;

use crate::checkout::ProviderMap;
use crate::wallet::WalletProvider;

/// Wire the full simulated provider set over the given wallet provider.
pub fn simulated<P: WalletProvider + 'static>(wallet_provider: P) -> ProviderMap {
    let mut providers: ProviderMap = ProviderMap::new();
    providers.insert(
        PaymentMethod::Wallet,
        Arc::new(WalletPay::new(wallet_provider)),
    );
    providers.insert(PaymentMethod::Custodial, Arc::new(CustodialPay));
    providers.insert(PaymentMethod::Mpesa, Arc::new(MpesaPay));
    providers
}
