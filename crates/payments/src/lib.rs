//! The purchase checkout workflow.
//!
//! Building blocks:
//!
//! - [`Checkout`] -- per-dialog orchestration: guards a method selection,
//!   records the pending purchase, then walks the provider-specific
//!   completion path.
//! - [`PaymentProvider`] -- the pluggable seam between the workflow and a
//!   payment rail. The bundled implementations in [`providers`] simulate
//!   settlement with fixed delays; real integrations replace them without
//!   touching the workflow.
//! - [`WalletConnector`] -- browser-wallet connection holder (request
//!   accounts, pin the target network, remember the address).
//! - [`PurchaseStore`] / [`DistributorResolver`] -- persistence seams,
//!   implemented over the database in the API crate and by in-memory fakes
//!   in tests.
//!
//! Every simulated wait races a `CancellationToken` tied to the checkout
//! instance, so closing the dialog can never produce a stale completion
//! notice.

pub mod checkout;
pub mod notice;
pub mod provider;
pub mod providers;
pub mod store;
pub mod wallet;

pub use checkout::{Checkout, CheckoutDisposition, CheckoutError, CheckoutOutcome, FilmSummary};
pub use notice::{Notice, NoticeLevel};
pub use provider::{PaymentError, PaymentProvider, PaymentRequest, ProviderDisposition, ProviderFlow};
pub use store::{DistributorResolver, NewPurchase, PendingPurchase, PurchaseStore, StoreError};
pub use wallet::{ConnectOutcome, SimulatedWallet, WalletConnector, WalletError, WalletProvider};
