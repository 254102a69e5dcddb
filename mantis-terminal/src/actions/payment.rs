//! Payment-side transaction actions

use std::sync::Arc;

use shared::{CreateIntentParams, PaymentIntent};
use tokio::sync::mpsc;
use tracing::{instrument, warn};

use super::{ActionEvent, fuse};
use crate::client::{
    CollectPaymentEvent, CreatePaymentEvent, ProcessPaymentEvent, TerminalClient,
};

impl ActionEvent for CreatePaymentEvent {
    fn is_terminal(&self) -> bool {
        true
    }
}

impl ActionEvent for CollectPaymentEvent {
    fn is_terminal(&self) -> bool {
        matches!(
            self,
            CollectPaymentEvent::Success(_) | CollectPaymentEvent::Failure(_)
        )
    }
}

impl ActionEvent for ProcessPaymentEvent {
    fn is_terminal(&self) -> bool {
        true
    }
}

/// Creates a payment intent at the terminal backend
pub struct CreatePaymentAction {
    terminal: Arc<dyn TerminalClient>,
}

impl CreatePaymentAction {
    pub fn new(terminal: Arc<dyn TerminalClient>) -> Self {
        Self { terminal }
    }

    /// Create a payment intent, reporting the outcome as an event stream
    #[instrument(skip(self, params), fields(amount = params.amount, currency = %params.currency))]
    pub async fn create_payment_intent(
        &self,
        params: CreateIntentParams,
    ) -> mpsc::Receiver<CreatePaymentEvent> {
        fuse(self.terminal.create_payment_intent(params).await)
    }
}

/// Runs the physical card interaction for an intent
pub struct CollectPaymentAction {
    terminal: Arc<dyn TerminalClient>,
}

impl CollectPaymentAction {
    pub fn new(terminal: Arc<dyn TerminalClient>) -> Self {
        Self { terminal }
    }

    /// Collect a payment method, forwarding reader prompts as they arrive
    #[instrument(skip(self, intent), fields(intent_id = %intent.id))]
    pub async fn collect_payment(
        &self,
        intent: PaymentIntent,
    ) -> mpsc::Receiver<CollectPaymentEvent> {
        fuse(self.terminal.collect_payment_method(intent).await)
    }
}

/// Authorizes a collected payment
pub struct ProcessPaymentAction {
    terminal: Arc<dyn TerminalClient>,
}

impl ProcessPaymentAction {
    pub fn new(terminal: Arc<dyn TerminalClient>) -> Self {
        Self { terminal }
    }

    /// Process a payment, reporting the outcome as an event stream
    #[instrument(skip(self, intent), fields(intent_id = %intent.id))]
    pub async fn process_payment(
        &self,
        intent: PaymentIntent,
    ) -> mpsc::Receiver<ProcessPaymentEvent> {
        fuse(self.terminal.process_payment(intent).await)
    }
}

/// Cancels an in-flight payment intent, best effort
pub struct CancelPaymentAction {
    terminal: Arc<dyn TerminalClient>,
}

impl CancelPaymentAction {
    pub fn new(terminal: Arc<dyn TerminalClient>) -> Self {
        Self { terminal }
    }

    /// Ask the SDK to cancel the intent. Failures are logged and swallowed;
    /// there is nothing useful the flow can do with them.
    #[instrument(skip(self, intent), fields(intent_id = %intent.id))]
    pub async fn cancel_payment(&self, intent: &PaymentIntent) {
        if let Err(e) = self.terminal.cancel_payment_intent(intent).await {
            warn!(error = %e, "cancel payment intent failed");
        }
    }
}
