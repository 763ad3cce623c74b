//! Purchase domain: payment methods, purchase status, and the per-checkout
//! state machine that guards method selection.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Payment methods
// ---------------------------------------------------------------------------

/// The fixed set of payment methods offered at checkout.
///
/// These are placeholders for future provider integrations; selecting one
/// records a pending purchase and walks a simulated completion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    /// Self-hosted browser wallet (MetaMask, Coinbase, any EVM wallet).
    Wallet,
    /// Platform-managed custodial wallet, created on the buyer's behalf.
    Custodial,
    /// M-Pesa mobile money (STK push).
    Mpesa,
}

/// Every offered method, in display order.
pub const ALL_METHODS: &[PaymentMethod] = &[
    PaymentMethod::Wallet,
    PaymentMethod::Custodial,
    PaymentMethod::Mpesa,
];

impl PaymentMethod {
    /// Parse from the wire / database `payment_method` value.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "wallet" => Ok(Self::Wallet),
            "custodial" => Ok(Self::Custodial),
            "mpesa" => Ok(Self::Mpesa),
            other => Err(CoreError::Validation(format!(
                "Unknown payment method '{other}'. Must be one of: wallet, custodial, mpesa"
            ))),
        }
    }

    /// Wire / database value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Wallet => "wallet",
            Self::Custodial => "custodial",
            Self::Mpesa => "mpesa",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Wallet => "Connect Wallet",
            Self::Custodial => "Custodial Wallet",
            Self::Mpesa => "M-Pesa",
        }
    }

    /// One-line description shown next to the method.
    pub fn description(self) -> &'static str {
        match self {
            Self::Wallet => "Use MetaMask, Coinbase, or any EVM wallet",
            Self::Custodial => "Quick setup - we manage your wallet securely",
            Self::Mpesa => "Pay with your mobile money",
        }
    }
}

// ---------------------------------------------------------------------------
// Purchase status
// ---------------------------------------------------------------------------

/// Application-defined purchase status strings.
///
/// Rows are created `Pending`; no code path currently writes a terminal
/// status back (settlement is simulated), but the vocabulary is fixed here
/// so provider integrations do not invent their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseStatus {
    Pending,
    Completed,
    Failed,
}

impl PurchaseStatus {
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(CoreError::Validation(format!(
                "Unknown purchase status '{other}'. Must be one of: pending, completed, failed"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

// ---------------------------------------------------------------------------
// Checkout flow state machine
// ---------------------------------------------------------------------------

/// State of one checkout instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    /// No method chosen (dialog open but idle, or closed).
    Idle,
    /// A method was selected and its attempt is in flight. While here, every
    /// other method selection is rejected.
    Processing { method: PaymentMethod },
    /// The simulated settlement path reported success.
    Succeeded { method: PaymentMethod },
    /// The attempt failed; the message is what was surfaced to the user.
    Failed { message: String },
}

/// Per-checkout purchase flow.
///
/// One instance exists per open checkout; it enforces the authentication
/// guard and the single-in-flight-attempt discipline. It deliberately knows
/// nothing about persistence or providers -- the `payments` crate drives it.
#[derive(Debug)]
pub struct PurchaseFlow {
    state: FlowState,
}

impl Default for PurchaseFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl PurchaseFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.state, FlowState::Processing { .. })
    }

    /// Begin an attempt for `method`.
    ///
    /// Rejected without any state change when the user is not authenticated
    /// (the caller surfaces a sign-in notice) or when another attempt is
    /// already processing.
    pub fn begin(&mut self, method: PaymentMethod, authenticated: bool) -> Result<(), CoreError> {
        if !authenticated {
            return Err(CoreError::Unauthorized(
                "You need to be signed in to purchase films".into(),
            ));
        }
        if let FlowState::Processing { method: current } = &self.state {
            return Err(CoreError::Conflict(format!(
                "A {} payment is already being processed",
                current.name()
            )));
        }
        self.state = FlowState::Processing { method };
        Ok(())
    }

    /// Mark the in-flight attempt as settled.
    pub fn succeed(&mut self) -> Result<(), CoreError> {
        match &self.state {
            FlowState::Processing { method } => {
                let method = *method;
                self.state = FlowState::Succeeded { method };
                Ok(())
            }
            _ => Err(CoreError::Internal(
                "succeed() called with no attempt in flight".into(),
            )),
        }
    }

    /// Mark the in-flight attempt as failed with the surfaced message.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), CoreError> {
        match &self.state {
            FlowState::Processing { .. } => {
                self.state = FlowState::Failed {
                    message: message.into(),
                };
                Ok(())
            }
            _ => Err(CoreError::Internal(
                "fail() called with no attempt in flight".into(),
            )),
        }
    }

    /// Return to `Idle`. Used on dialog close and on the wallet-missing
    /// path, which counts as a cancelled attempt rather than a terminal one.
    pub fn reset(&mut self) {
        self.state = FlowState::Idle;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_round_trips() {
        for &method in ALL_METHODS {
            assert_eq!(PaymentMethod::from_name(method.name()).unwrap(), method);
        }
        assert!(PaymentMethod::from_name("card").is_err());
        assert!(PaymentMethod::from_name("").is_err());
    }

    #[test]
    fn method_labels() {
        assert_eq!(PaymentMethod::Wallet.label(), "Connect Wallet");
        assert_eq!(PaymentMethod::Custodial.label(), "Custodial Wallet");
        assert_eq!(PaymentMethod::Mpesa.label(), "M-Pesa");
    }

    #[test]
    fn status_round_trips() {
        for status in [
            PurchaseStatus::Pending,
            PurchaseStatus::Completed,
            PurchaseStatus::Failed,
        ] {
            assert_eq!(PurchaseStatus::from_name(status.name()).unwrap(), status);
        }
        assert!(PurchaseStatus::from_name("refunded").is_err());
    }

    #[test]
    fn begin_requires_authentication() {
        let mut flow = PurchaseFlow::new();
        let err = flow.begin(PaymentMethod::Mpesa, false).unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized(_)));
        // Rejected before any state change.
        assert_eq!(*flow.state(), FlowState::Idle);
    }

    #[test]
    fn begin_transitions_to_processing() {
        let mut flow = PurchaseFlow::new();
        flow.begin(PaymentMethod::Wallet, true).unwrap();
        assert!(flow.is_processing());
        assert_eq!(
            *flow.state(),
            FlowState::Processing {
                method: PaymentMethod::Wallet
            }
        );
    }

    #[test]
    fn only_one_attempt_in_flight() {
        let mut flow = PurchaseFlow::new();
        flow.begin(PaymentMethod::Custodial, true).unwrap();
        let err = flow.begin(PaymentMethod::Mpesa, true).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
        // The original attempt is untouched.
        assert_eq!(
            *flow.state(),
            FlowState::Processing {
                method: PaymentMethod::Custodial
            }
        );
    }

    #[test]
    fn succeed_and_fail_require_processing() {
        let mut flow = PurchaseFlow::new();
        assert!(flow.succeed().is_err());
        assert!(flow.fail("boom").is_err());

        flow.begin(PaymentMethod::Mpesa, true).unwrap();
        flow.succeed().unwrap();
        assert_eq!(
            *flow.state(),
            FlowState::Succeeded {
                method: PaymentMethod::Mpesa
            }
        );
    }

    #[test]
    fn fail_records_the_surfaced_message() {
        let mut flow = PurchaseFlow::new();
        flow.begin(PaymentMethod::Wallet, true).unwrap();
        flow.fail("Wallet connection failed").unwrap();
        assert_eq!(
            *flow.state(),
            FlowState::Failed {
                message: "Wallet connection failed".into()
            }
        );
    }

    #[test]
    fn reset_returns_to_idle_and_allows_a_fresh_attempt() {
        let mut flow = PurchaseFlow::new();
        flow.begin(PaymentMethod::Wallet, true).unwrap();
        flow.reset();
        assert_eq!(*flow.state(), FlowState::Idle);
        assert!(flow.begin(PaymentMethod::Mpesa, true).is_ok());
    }
}
