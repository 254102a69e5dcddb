//! Terminal client port over the external card-reader SDK
//!
//! Each streaming operation hands back the receiving half of a channel: one
//! call produces zero or more progress events followed by exactly one
//! terminal outcome, after which the stream closes.

use async_trait::async_trait;
use shared::{CreateIntentParams, PaymentIntent, RefundParams};
use tokio::sync::mpsc;

use crate::error::{TerminalError, TerminalResult};

/// One event from a create-intent call
#[derive(Debug, Clone)]
pub enum CreatePaymentEvent {
    Success(PaymentIntent),
    Failure(TerminalError),
}

/// One event from a collect-payment-method call
///
/// The reader raises display/input prompts while the card interaction is
/// still in flight; they do not end the stream.
#[derive(Debug, Clone)]
pub enum CollectPaymentEvent {
    /// The reader asks to show a message to the customer
    DisplayMessageRequested(String),
    /// The reader waits for customer input (tap, insert, swipe)
    ReaderInputRequested(String),
    Success(PaymentIntent),
    Failure(TerminalError),
}

/// One event from a process-payment call
#[derive(Debug, Clone)]
pub enum ProcessPaymentEvent {
    Success(PaymentIntent),
    Failure(TerminalError),
}

/// One event from a collect-refund or process-refund call
#[derive(Debug, Clone)]
pub enum RefundEvent {
    Success,
    Failure(TerminalError),
}

/// Port over the external terminal SDK
///
/// Implementations wrap the vendor SDK; everything above this trait is
/// SDK-agnostic. All methods are invoked sequentially for a given intent -
/// the orchestrator never issues two calls concurrently for the same
/// transaction.
#[async_trait]
pub trait TerminalClient: Send + Sync {
    /// Whether a reader is connected and the SDK is initialized
    fn is_initialized(&self) -> bool;

    /// Create a payment intent at the backend
    async fn create_payment_intent(
        &self,
        params: CreateIntentParams,
    ) -> mpsc::Receiver<CreatePaymentEvent>;

    /// Run the physical card interaction for an intent
    async fn collect_payment_method(
        &self,
        intent: PaymentIntent,
    ) -> mpsc::Receiver<CollectPaymentEvent>;

    /// Authorize a collected payment
    async fn process_payment(&self, intent: PaymentIntent) -> mpsc::Receiver<ProcessPaymentEvent>;

    /// Cancel an in-flight intent. Best effort; the SDK may already have
    /// moved past the point where cancellation is possible.
    async fn cancel_payment_intent(&self, intent: &PaymentIntent) -> TerminalResult<()>;

    /// Run the card interaction for a refund
    async fn collect_refund(&self, params: RefundParams) -> mpsc::Receiver<RefundEvent>;

    /// Process the refund collected by the previous call
    async fn process_refund(&self) -> mpsc::Receiver<RefundEvent>;
}
