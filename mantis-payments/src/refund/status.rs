//! Refund lifecycle events and failure taxonomy

use shared::RefundParams;

/// Why the card network declined a refund.
///
/// Callers branch on this to show tailored guidance, so every reason is a
/// distinct variant; codes outside the known set surface as [`Unknown`]
/// rather than being folded into a nearby bucket.
///
/// [`Unknown`]: DeclineReason::Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclineReason {
    /// Transient issuer/processing problem; trying again may work
    Temporary,
    /// The network flagged the card (lost, stolen, fraudulent, ...)
    Fraud,
    /// Declined with no usable reason
    Generic,
    /// The account is invalid or has new information available
    InvalidAccount,
    /// This card cannot make this kind of purchase
    CardNotSupported,
    /// This card cannot transact in this currency
    CurrencyNotSupported,
    /// The network saw an identical transaction very recently
    DuplicateTransaction,
    ExpiredCard,
    IncorrectPostalCode,
    InsufficientFunds,
    InvalidAmount,
    /// The card requires PIN entry (offline or online)
    PinRequired,
    TooManyPinTries,
    /// Test card used against a live-mode request
    TestCard,
    /// Live card used against a test-mode request
    TestModeLiveCard,
    /// Decline code missing or not in the known set
    Unknown,
}

impl DeclineReason {
    /// Classify a backend decline code.
    ///
    /// The table is the card-network vocabulary this core understands; any
    /// other code, and a decline with no code at all, is [`Unknown`].
    ///
    /// [`Unknown`]: DeclineReason::Unknown
    pub fn from_decline_code(code: Option<&str>) -> Self {
        let Some(code) = code else {
            return Self::Unknown;
        };

        match code {
            "approve_with_id"
            | "issuer_not_available"
            | "processing_error"
            | "reenter_transaction"
            | "try_again_later" => Self::Temporary,

            "call_issuer"
            | "card_velocity_exceeded"
            | "do_not_honor"
            | "do_not_try_again"
            | "fraudulent"
            | "lost_card"
            | "merchant_blacklist"
            | "pickup_card"
            | "restricted_card"
            | "revocation_of_all_authorizations"
            | "revocation_of_authorization"
            | "security_violation"
            | "stolen_card"
            | "stop_payment_order" => Self::Fraud,

            "generic_decline"
            | "no_action_taken"
            | "not_permitted"
            | "service_not_allowed"
            | "transaction_not_allowed" => Self::Generic,

            "invalid_account" | "new_account_information_available" => Self::InvalidAccount,

            "card_not_supported" => Self::CardNotSupported,
            "currency_not_supported" => Self::CurrencyNotSupported,
            "duplicate_transaction" => Self::DuplicateTransaction,
            "expired_card" => Self::ExpiredCard,
            "incorrect_zip" => Self::IncorrectPostalCode,

            "insufficient_funds" | "withdrawal_count_limit_exceeded" => Self::InsufficientFunds,

            "invalid_amount" => Self::InvalidAmount,

            "invalid_pin" | "offline_pin_required" | "online_or_offline_pin_required" => {
                Self::PinRequired
            }

            "pin_try_exceeded" => Self::TooManyPinTries,
            "testmode_decline" => Self::TestCard,
            "test_mode_live_card" => Self::TestModeLiveCard,

            _ => Self::Unknown,
        }
    }
}

/// Machine-readable classification of a refund failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefundFailureKind {
    /// The terminal could not reach the payment backend
    NoNetwork,
    /// The refund was canceled at the terminal
    Cancelled,
    /// Everything the taxonomy has no better name for
    Generic,
    /// The backend declined the refund
    Declined(DeclineReason),
}

/// A classified refund failure
#[derive(Debug, Clone, PartialEq)]
pub struct RefundFailure {
    pub kind: RefundFailureKind,
    /// Human-readable failure description for logging and diagnostics
    pub message: String,
    /// The original request, echoed back so the caller can re-attempt
    /// without re-deriving it
    pub refund_params: RefundParams,
}

/// One lifecycle event of an Interac refund
///
/// Produced only by the refund orchestrator; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum CardInteracRefundStatus {
    /// Waiting for the card interaction at the reader
    CollectingRefund,
    /// Processing the collected refund
    ProcessingRefund,
    /// The refund went through
    RefundSuccess,
    /// The refund failed
    RefundFailure(RefundFailure),
}
