//! Error types for the terminal seam

use shared::PaymentIntent;
use thiserror::Error;

/// Low-level failure codes surfaced by the terminal SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalErrorCode {
    /// No card was presented before the reader gave up
    CardReadTimedOut,
    /// The payment backend declined the request
    DeclinedByBackend,
    /// A backend round-trip timed out
    RequestTimedOut,
    /// The backend rejected the request with an API error
    BackendApiError,
    /// The SDK could not reach the backend at all
    ConnectionError,
    /// The operation was canceled
    Canceled,
    /// The reader is busy with another operation
    ReaderBusy,
    /// No reader is connected
    NotConnectedToReader,
    /// Any other SDK failure
    Generic,
}

/// Decline details the backend attached to a rejected request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendApiError {
    /// Card-network decline code, e.g. `"insufficient_funds"`
    pub decline_code: Option<String>,
    pub message: String,
}

/// A failure reported by the terminal SDK
///
/// Carries the in-flight payment intent when the SDK still holds one, so
/// the caller can resume from the last good step instead of starting over.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TerminalError {
    /// The failure code identifying the type of error
    pub code: TerminalErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Intent the SDK was working on when it failed, if any
    pub payment_intent: Option<PaymentIntent>,
    /// Backend decline details, present for declined requests
    pub api_error: Option<BackendApiError>,
}

impl TerminalError {
    /// Create a new error with a code and message
    pub fn new(code: TerminalErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            payment_intent: None,
            api_error: None,
        }
    }

    /// Attach the intent the SDK was working on when it failed
    pub fn with_payment_intent(mut self, intent: PaymentIntent) -> Self {
        self.payment_intent = Some(intent);
        self
    }

    /// Attach backend decline details
    pub fn with_api_error(mut self, api_error: BackendApiError) -> Self {
        self.api_error = Some(api_error);
        self
    }

    /// Decline code from the attached backend error, if any
    pub fn decline_code(&self) -> Option<&str> {
        self.api_error
            .as_ref()
            .and_then(|e| e.decline_code.as_deref())
    }
}

/// Result type for terminal operations
pub type TerminalResult<T> = Result<T, TerminalError>;
