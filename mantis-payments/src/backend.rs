//! Port over the merchant order/payment store

use async_trait::async_trait;
use thiserror::Error;

/// Failure modes of the backend capture call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The backend could not be reached
    #[error("network error while capturing payment")]
    Network,

    /// The backend answered with a server-side failure
    #[error("server error while capturing payment")]
    Server,

    /// Any other capture failure
    #[error("capture failed: {0}")]
    Other(String),
}

/// Port over the merchant backend that finalizes authorized payments.
///
/// Capture must be idempotent on the backend side: capturing an intent that
/// a parallel retry already captured reports success, not an error. The
/// orchestrator relies on this to make capture retryable.
#[async_trait]
pub trait PaymentBackend: Send + Sync {
    /// Capture an authorized payment intent for an order
    async fn capture_payment_intent(
        &self,
        order_id: u64,
        intent_id: &str,
    ) -> Result<(), CaptureError>;
}
