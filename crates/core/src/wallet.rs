//! Browser-wallet connection state and the fixed target network.

/// Chain id of the target network (Base mainnet).
pub const TARGET_CHAIN_ID: u64 = 8453;

/// Hex form of [`TARGET_CHAIN_ID`] as used by injected provider requests.
pub const TARGET_CHAIN_ID_HEX: &str = "0x2105";

/// Display name of the target network.
pub const TARGET_CHAIN_NAME: &str = "Base";

/// Install page opened when no wallet provider is present.
pub const WALLET_INSTALL_URL: &str = "https://www.coinbase.com/wallet";

/// Connection state of a browser wallet.
///
/// Local-only: nothing here subscribes to provider-side account or network
/// changes, so the state can go stale if the user disconnects from within
/// the wallet's own UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WalletState {
    #[default]
    Disconnected,
    Connecting,
    Connected {
        address: String,
    },
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, Self::Connecting)
    }

    /// Connected address, if any.
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Connected { address } => Some(address),
            _ => None,
        }
    }
}
