//! Payment lifecycle events emitted to the UI layer

use shared::PaymentIntent;

/// Opaque continuation token for resuming a failed payment.
///
/// Wraps the last good payment intent. The caller owns the value between
/// orchestrator invocations and hands it back to
/// [`retry_payment`](crate::PaymentOrchestrator::retry_payment) or
/// [`cancel_payment`](crate::PaymentOrchestrator::cancel_payment); it is
/// immutable once handed out.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentData {
    pub(crate) intent: PaymentIntent,
}

impl PaymentData {
    pub(crate) fn new(intent: PaymentIntent) -> Self {
        Self { intent }
    }
}

/// Machine-readable classification of a payment failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentFailureKind {
    /// No card was presented before the reader gave up
    CardReadTimedOut,
    /// The card network declined the payment
    PaymentDeclined,
    /// A backend round-trip could not complete
    NoNetwork,
    /// The amount is below the processing minimum
    AmountTooSmall,
    /// The backend failed server-side
    ServerError,
    /// Everything else
    Generic,
}

/// One lifecycle event of a card payment
///
/// Produced only by the payment orchestrator and consumed by the UI layer;
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum CardPaymentStatus {
    /// Creating the payment intent at the backend
    InitializingPayment,
    /// Waiting for the card interaction at the reader
    CollectingPayment,
    /// The reader asks to show a message to the customer
    ShowAdditionalInfo { message: String },
    /// The reader waits for the customer to present a card
    WaitingForReaderInput { options: String },
    /// Authorizing the collected payment
    ProcessingPayment,
    /// Finalizing the authorized payment at the merchant backend
    CapturingPayment,
    /// The payment went through
    PaymentCompleted { receipt_url: String },
    /// The payment failed
    PaymentFailed {
        kind: PaymentFailureKind,
        /// Continuation token for resuming from the last good step; absent
        /// when there is nothing to resume (validation failures, intent
        /// creation failures)
        payment_data: Option<PaymentData>,
        /// Human-readable failure description for logging and diagnostics
        message: String,
    },
}
