//! Browser-wallet connection holder.
//!
//! [`WalletConnector`] drives an injected [`WalletProvider`] through the
//! connect sequence: request account access, pin the target network (adding
//! it when the provider does not know it), and remember the first returned
//! address. Disconnecting only clears local state; there is no
//! provider-level revocation and no subscription to external account or
//! network changes.

use async_trait::async_trait;

use reelhouse_core::wallet::{WalletState, TARGET_CHAIN_ID, WALLET_INSTALL_URL};

/// Failures from the injected wallet provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WalletError {
    /// The user declined the account-access prompt.
    #[error("Wallet connection failed")]
    Rejected,

    /// The provider does not know the requested chain; callers add it and
    /// retry the switch.
    #[error("Unrecognized chain")]
    UnrecognizedChain,

    /// The provider returned an empty account list.
    #[error("Wallet returned no accounts")]
    NoAccounts,

    /// Any other provider-internal failure.
    #[error("Wallet provider error: {0}")]
    Provider(String),
}

/// The injected wallet interface (the in-page extension API, behind a
/// trait so tests and server-side wiring can substitute their own).
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether a provider is present at all. Absence is a valid, handled
    /// state, not an error.
    fn is_available(&self) -> bool;

    /// Prompt the user for account access; returns the account addresses.
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError>;

    /// Switch the active chain. Fails with
    /// [`WalletError::UnrecognizedChain`] when the chain was never added.
    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError>;

    /// Register a chain with the provider.
    async fn add_chain(&self, chain_id: u64) -> Result<(), WalletError>;
}

/// Result of a connect attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected { address: String },
    /// No provider present: the caller should open the install page. Local
    /// state stays disconnected.
    InstallRequired { install_url: &'static str },
}

/// Tracks one wallet connection.
#[derive(Debug)]
pub struct WalletConnector<P> {
    provider: P,
    state: WalletState,
}

impl<P: WalletProvider> WalletConnector<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: WalletState::Disconnected,
        }
    }

    pub fn state(&self) -> &WalletState {
        &self.state
    }

    /// Run the connect sequence against the provider.
    ///
    /// On any provider failure the local state is reset to disconnected
    /// before the error is returned.
    pub async fn connect(&mut self) -> Result<ConnectOutcome, WalletError> {
        if !self.provider.is_available() {
            return Ok(ConnectOutcome::InstallRequired {
                install_url: WALLET_INSTALL_URL,
            });
        }

        self.state = WalletState::Connecting;

        let result = self.connect_inner().await;
        match result {
            Ok(address) => {
                self.state = WalletState::Connected {
                    address: address.clone(),
                };
                Ok(ConnectOutcome::Connected { address })
            }
            Err(err) => {
                self.state = WalletState::Disconnected;
                Err(err)
            }
        }
    }

    async fn connect_inner(&self) -> Result<String, WalletError> {
        let accounts = self.provider.request_accounts().await?;

        match self.provider.switch_chain(TARGET_CHAIN_ID).await {
            Ok(()) => {}
            Err(WalletError::UnrecognizedChain) => {
                self.provider.add_chain(TARGET_CHAIN_ID).await?;
                self.provider.switch_chain(TARGET_CHAIN_ID).await?;
            }
            Err(err) => return Err(err),
        }

        accounts.into_iter().next().ok_or(WalletError::NoAccounts)
    }

    /// Clear local state unconditionally. No provider-level revocation.
    pub fn disconnect(&mut self) {
        self.state = WalletState::Disconnected;
    }
}

/// A wallet simulation for environments with no real injected provider
/// (server-side wiring, demos). Behavior is fixed at construction.
#[derive(Debug, Clone)]
pub struct SimulatedWallet {
    available: bool,
    reject: bool,
    address: String,
}

impl SimulatedWallet {
    /// A present, cooperative wallet holding one account.
    pub fn available() -> Self {
        Self {
            available: true,
            reject: false,
            address: "0x5e11e3b1ad5e1f00".into(),
        }
    }

    /// No injected provider at all.
    pub fn absent() -> Self {
        Self {
            available: false,
            reject: false,
            address: String::new(),
        }
    }

    /// A present wallet whose user declines the account prompt.
    pub fn rejecting() -> Self {
        Self {
            available: true,
            reject: true,
            address: String::new(),
        }
    }
}

#[async_trait]
impl WalletProvider for SimulatedWallet {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        if self.reject {
            Err(WalletError::Rejected)
        } else {
            Ok(vec![self.address.clone()])
        }
    }

    async fn switch_chain(&self, _chain_id: u64) -> Result<(), WalletError> {
        Ok(())
    }

    async fn add_chain(&self, _chain_id: u64) -> Result<(), WalletError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    use super::*;

    /// Configurable fake provider.
    #[derive(Default)]
    struct FakeProvider {
        available: bool,
        reject: bool,
        chain_known: AtomicBool,
        add_chain_calls: AtomicU32,
        accounts: Vec<String>,
    }

    impl FakeProvider {
        fn available_with(accounts: &[&str]) -> Self {
            Self {
                available: true,
                chain_known: AtomicBool::new(true),
                accounts: accounts.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl WalletProvider for FakeProvider {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
            if self.reject {
                return Err(WalletError::Rejected);
            }
            Ok(self.accounts.clone())
        }

        async fn switch_chain(&self, _chain_id: u64) -> Result<(), WalletError> {
            if self.chain_known.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(WalletError::UnrecognizedChain)
            }
        }

        async fn add_chain(&self, _chain_id: u64) -> Result<(), WalletError> {
            self.add_chain_calls.fetch_add(1, Ordering::SeqCst);
            self.chain_known.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn connect_stores_first_address() {
        let mut connector =
            WalletConnector::new(FakeProvider::available_with(&["0xaaa", "0xbbb"]));

        let outcome = connector.connect().await.unwrap();
        assert_eq!(
            outcome,
            ConnectOutcome::Connected {
                address: "0xaaa".into()
            }
        );
        assert_eq!(connector.state().address(), Some("0xaaa"));
    }

    #[tokio::test]
    async fn absent_provider_yields_install_url_and_stays_disconnected() {
        let mut connector = WalletConnector::new(FakeProvider::default());

        let outcome = connector.connect().await.unwrap();
        assert_eq!(
            outcome,
            ConnectOutcome::InstallRequired {
                install_url: WALLET_INSTALL_URL
            }
        );
        assert!(!connector.state().is_connected());
    }

    #[tokio::test]
    async fn unrecognized_chain_is_added_then_retried() {
        let provider = FakeProvider {
            available: true,
            chain_known: AtomicBool::new(false),
            accounts: vec!["0xaaa".into()],
            ..Default::default()
        };
        let mut connector = WalletConnector::new(provider);

        let outcome = connector.connect().await.unwrap();
        assert!(matches!(outcome, ConnectOutcome::Connected { .. }));
        assert_eq!(
            connector.provider.add_chain_calls.load(Ordering::SeqCst),
            1
        );
    }

    #[tokio::test]
    async fn rejection_resets_state() {
        let provider = FakeProvider {
            available: true,
            reject: true,
            chain_known: AtomicBool::new(true),
            ..Default::default()
        };
        let mut connector = WalletConnector::new(provider);

        let err = connector.connect().await.unwrap_err();
        assert!(matches!(err, WalletError::Rejected));
        assert_eq!(*connector.state(), WalletState::Disconnected);
    }

    #[tokio::test]
    async fn empty_account_list_is_an_error() {
        let mut connector = WalletConnector::new(FakeProvider::available_with(&[]));
        let err = connector.connect().await.unwrap_err();
        assert!(matches!(err, WalletError::NoAccounts));
        assert_eq!(*connector.state(), WalletState::Disconnected);
    }

    #[tokio::test]
    async fn disconnect_clears_local_state() {
        let mut connector = WalletConnector::new(FakeProvider::available_with(&["0xaaa"]));
        connector.connect().await.unwrap();
        assert!(connector.state().is_connected());

        connector.disconnect();
        assert_eq!(*connector.state(), WalletState::Disconnected);
    }
}
