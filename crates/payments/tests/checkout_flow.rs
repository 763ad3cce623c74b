//! End-to-end checkout workflow tests against in-memory fakes.
//!
//! Time is paused, so the simulated settlement delays elapse instantly.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use async_trait::async_trait;

use reelhouse_core::purchase::{FlowState, PaymentMethod};
use reelhouse_core::types::DbId;
use reelhouse_core::wallet::WALLET_INSTALL_URL;
use reelhouse_payments::{
    providers, Checkout, CheckoutDisposition, CheckoutError, DistributorResolver, FilmSummary,
    NewPurchase, NoticeLevel, PaymentError, PendingPurchase, PurchaseStore, StoreError,
    WalletError, WalletProvider,
};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
struct InMemoryStore {
    rows: Mutex<Vec<NewPurchase>>,
    fail_with: Mutex<Option<String>>,
    next_id: AtomicI64,
}

impl InMemoryStore {
    fn rows(&self) -> Vec<NewPurchase> {
        self.rows.lock().unwrap().clone()
    }

    fn fail_with(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }
}

#[async_trait]
impl PurchaseStore for InMemoryStore {
    async fn create_pending(&self, purchase: NewPurchase) -> Result<PendingPurchase, StoreError> {
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(StoreError(message));
        }
        self.rows.lock().unwrap().push(purchase);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(PendingPurchase { id })
    }
}

#[derive(Default)]
struct MapResolver {
    tokens: HashMap<(DbId, String), DbId>,
}

#[async_trait]
impl DistributorResolver for MapResolver {
    async fn resolve(&self, film_id: DbId, token_code: &str) -> Result<Option<DbId>, StoreError> {
        Ok(self.tokens.get(&(film_id, token_code.to_string())).copied())
    }
}

struct FakeWallet {
    available: bool,
    reject: bool,
}

#[async_trait]
impl WalletProvider for FakeWallet {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        if self.reject {
            Err(WalletError::Rejected)
        } else {
            Ok(vec!["0xbuyer".into()])
        }
    }

    async fn switch_chain(&self, _chain_id: u64) -> Result<(), WalletError> {
        Ok(())
    }

    async fn add_chain(&self, _chain_id: u64) -> Result<(), WalletError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn film() -> FilmSummary {
    FilmSummary {
        id: 1,
        title: "The Long Rains".into(),
        selling_price: 500.0,
        currency: "KES".into(),
        poster_url: None,
    }
}

fn checkout_with(
    store: Arc<InMemoryStore>,
    resolver: Arc<MapResolver>,
    wallet: FakeWallet,
    user_id: Option<DbId>,
    distributor_code: Option<String>,
) -> Checkout {
    Checkout::new(
        store,
        resolver,
        providers::simulated(wallet),
        film(),
        user_id,
        distributor_code,
    )
}

fn available_wallet() -> FakeWallet {
    FakeWallet {
        available: true,
        reject: false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Every method inserts exactly one pending row with the film's price.
#[tokio::test(start_paused = true)]
async fn each_method_inserts_exactly_one_pending_row() {
    for method in [
        PaymentMethod::Wallet,
        PaymentMethod::Custodial,
        PaymentMethod::Mpesa,
    ] {
        let store = Arc::new(InMemoryStore::default());
        let mut checkout = checkout_with(
            Arc::clone(&store),
            Arc::new(MapResolver::default()),
            available_wallet(),
            Some(7),
            None,
        );

        let outcome = checkout.select_method(method).await.unwrap();
        assert_eq!(outcome.disposition, CheckoutDisposition::Completed);

        let rows = store.rows();
        assert_eq!(rows.len(), 1, "method {} should insert once", method.name());
        assert_eq!(rows[0].amount, 500.0);
        assert_eq!(rows[0].currency, "KES");
        assert_eq!(rows[0].method, method);
        assert_eq!(rows[0].user_id, 7);
        assert_eq!(rows[0].film_id, 1);
    }
}

/// Unauthenticated selection is rejected before any insert.
#[tokio::test(start_paused = true)]
async fn unauthenticated_selection_inserts_nothing() {
    let store = Arc::new(InMemoryStore::default());
    let mut checkout = checkout_with(
        Arc::clone(&store),
        Arc::new(MapResolver::default()),
        available_wallet(),
        None,
        None,
    );

    let err = checkout.select_method(PaymentMethod::Mpesa).await.unwrap_err();
    assert!(err.user_message().contains("signed in"));
    assert!(store.rows().is_empty());
    assert_eq!(*checkout.flow_state(), FlowState::Idle);
}

/// A film without a positive price never starts an attempt.
#[tokio::test(start_paused = true)]
async fn free_film_is_rejected_before_any_insert() {
    let store = Arc::new(InMemoryStore::default());
    let mut checkout = Checkout::new(
        Arc::clone(&store) as Arc<dyn PurchaseStore>,
        Arc::new(MapResolver::default()),
        providers::simulated(available_wallet()),
        FilmSummary {
            selling_price: 0.0,
            ..film()
        },
        Some(7),
        None,
    );

    let err = checkout.select_method(PaymentMethod::Mpesa).await.unwrap_err();
    assert_matches!(err, CheckoutError::Core(_));
    assert!(store.rows().is_empty());
}

/// The KES 500 mpesa scenario: one pending row, an STK notice, then a
/// success notice naming the film, then close.
#[tokio::test(start_paused = true)]
async fn mpesa_scenario_kes_500() {
    let store = Arc::new(InMemoryStore::default());
    let mut checkout = checkout_with(
        Arc::clone(&store),
        Arc::new(MapResolver::default()),
        available_wallet(),
        Some(7),
        None,
    );

    let outcome = checkout.select_method(PaymentMethod::Mpesa).await.unwrap();

    let rows = store.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, 500.0);
    assert_eq!(rows[0].currency, "KES");
    assert_eq!(rows[0].method, PaymentMethod::Mpesa);

    assert_eq!(outcome.notices.len(), 2);
    assert_eq!(outcome.notices[0].title, "M-Pesa Payment");
    assert!(outcome.notices[0].body.contains("STK push"));
    assert_eq!(outcome.notices[1].level, NoticeLevel::Success);
    assert!(outcome.notices[1].body.contains("The Long Rains"));

    // Completed means the dialog closes.
    assert_eq!(outcome.disposition, CheckoutDisposition::Completed);
}

/// Custodial path walks both setup and settlement notices.
#[tokio::test(start_paused = true)]
async fn custodial_path_reports_wallet_creation() {
    let store = Arc::new(InMemoryStore::default());
    let mut checkout = checkout_with(
        Arc::clone(&store),
        Arc::new(MapResolver::default()),
        available_wallet(),
        Some(7),
        None,
    );

    let outcome = checkout
        .select_method(PaymentMethod::Custodial)
        .await
        .unwrap();

    let titles: Vec<&str> = outcome.notices.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Creating Your Wallet...", "Wallet Created!", "Payment Successful!"]
    );
}

/// No wallet provider: install page surfaced exactly once, one pending row,
/// and no terminal state -- a retry needs a fresh selection.
#[tokio::test(start_paused = true)]
async fn wallet_missing_opens_install_page_without_terminal_state() {
    let store = Arc::new(InMemoryStore::default());
    let mut checkout = checkout_with(
        Arc::clone(&store),
        Arc::new(MapResolver::default()),
        FakeWallet {
            available: false,
            reject: false,
        },
        Some(7),
        None,
    );

    let outcome = checkout.select_method(PaymentMethod::Wallet).await.unwrap();

    assert_eq!(
        outcome.disposition,
        CheckoutDisposition::WalletMissing {
            install_url: WALLET_INSTALL_URL.to_string()
        }
    );
    assert_eq!(outcome.notices.len(), 1);
    assert_eq!(outcome.notices[0].title, "No Wallet Detected");

    // One row from the single selection, none from the missing-wallet path.
    assert_eq!(store.rows().len(), 1);

    // The flow returned to idle: a fresh, explicit selection is required
    // before anything else is inserted.
    assert_eq!(*checkout.flow_state(), FlowState::Idle);

    // A fresh selection is a new attempt and records a new intent.
    let second = checkout.select_method(PaymentMethod::Wallet).await.unwrap();
    assert_matches!(second.disposition, CheckoutDisposition::WalletMissing { .. });
    assert_eq!(store.rows().len(), 2);
}

/// The user declining the wallet prompt fails the attempt after the row
/// was inserted, with a generic failure message.
#[tokio::test(start_paused = true)]
async fn wallet_rejection_is_a_generic_failure() {
    let store = Arc::new(InMemoryStore::default());
    let mut checkout = checkout_with(
        Arc::clone(&store),
        Arc::new(MapResolver::default()),
        FakeWallet {
            available: true,
            reject: true,
        },
        Some(7),
        None,
    );

    let err = checkout.select_method(PaymentMethod::Wallet).await.unwrap_err();
    assert_matches!(err, CheckoutError::Payment(PaymentError::Rejected(_)));
    assert_eq!(err.user_message(), "Wallet connection failed");

    // The pending row had already been recorded.
    assert_eq!(store.rows().len(), 1);
    assert_matches!(*checkout.flow_state(), FlowState::Failed { .. });
}

/// Store insert failures surface the store's message verbatim and leave the
/// dialog interactable.
#[tokio::test(start_paused = true)]
async fn insert_failure_surfaces_store_message_verbatim() {
    let store = Arc::new(InMemoryStore::default());
    store.fail_with("connection reset by peer");

    let mut checkout = checkout_with(
        Arc::clone(&store),
        Arc::new(MapResolver::default()),
        available_wallet(),
        Some(7),
        None,
    );

    let err = checkout.select_method(PaymentMethod::Mpesa).await.unwrap_err();
    assert_matches!(err, CheckoutError::Store(_));
    assert_eq!(err.user_message(), "connection reset by peer");

    // Back to idle: the user can immediately pick another method.
    assert_eq!(*checkout.flow_state(), FlowState::Idle);
    assert!(checkout.select_method(PaymentMethod::Mpesa).await.is_err());
}

/// Closing the checkout cancels the in-flight simulated settlement; no
/// success notice fires after close.
#[tokio::test(start_paused = true)]
async fn cancellation_suppresses_stale_completion() {
    let store = Arc::new(InMemoryStore::default());
    let mut checkout = checkout_with(
        Arc::clone(&store),
        Arc::new(MapResolver::default()),
        available_wallet(),
        Some(7),
        None,
    );

    // The dialog is closed while the attempt is about to wait on the
    // simulated delay.
    checkout.cancellation_token().cancel();

    let err = checkout.select_method(PaymentMethod::Mpesa).await.unwrap_err();
    assert_matches!(err, CheckoutError::Cancelled);

    // The pending intent was recorded, but no completion was reported and
    // the flow ended idle.
    assert_eq!(store.rows().len(), 1);
    assert_eq!(*checkout.flow_state(), FlowState::Idle);
}

/// A valid referral code attributes the purchase to its distributor; an
/// unknown code never blocks the sale.
#[tokio::test(start_paused = true)]
async fn referral_codes_attribute_but_never_block() {
    let mut tokens = HashMap::new();
    tokens.insert((1, "RAINS-AMINA".to_string()), 42);
    let resolver = Arc::new(MapResolver { tokens });

    // Valid code → attributed.
    let store = Arc::new(InMemoryStore::default());
    let mut checkout = checkout_with(
        Arc::clone(&store),
        Arc::clone(&resolver),
        available_wallet(),
        Some(7),
        Some("RAINS-AMINA".into()),
    );
    checkout.select_method(PaymentMethod::Mpesa).await.unwrap();
    assert_eq!(store.rows()[0].distributor_id, Some(42));

    // Unknown code → unattributed, sale proceeds.
    let store = Arc::new(InMemoryStore::default());
    let mut checkout = checkout_with(
        Arc::clone(&store),
        Arc::clone(&resolver),
        available_wallet(),
        Some(7),
        Some("NO-SUCH-CODE".into()),
    );
    let outcome = checkout.select_method(PaymentMethod::Mpesa).await.unwrap();
    assert_eq!(outcome.disposition, CheckoutDisposition::Completed);
    assert_eq!(store.rows()[0].distributor_id, None);
}

/// close() always returns the flow to idle.
#[tokio::test(start_paused = true)]
async fn close_resets_the_flow() {
    let store = Arc::new(InMemoryStore::default());
    let mut checkout = checkout_with(
        Arc::clone(&store),
        Arc::new(MapResolver::default()),
        available_wallet(),
        Some(7),
        None,
    );

    checkout.select_method(PaymentMethod::Mpesa).await.unwrap();
    assert_matches!(*checkout.flow_state(), FlowState::Succeeded { .. });

    checkout.close();
    assert_eq!(*checkout.flow_state(), FlowState::Idle);
}
