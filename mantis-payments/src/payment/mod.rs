//! Payment orchestration - drives one payment intent through its lifecycle
//!
//! One `accept_payment` call runs a single linear pipeline:
//!
//! ```text
//! validate ──► create ──► collect ──► process ──► capture ──► completed
//!                 │           │           │           │
//!                 └───────────┴───────────┴───────────┴──► PaymentFailed
//! ```
//!
//! Steps run strictly in order; each failure is classified onto the closed
//! [`PaymentFailureKind`] taxonomy and, where the flow can be resumed,
//! carries a [`PaymentData`] continuation token wrapping the last good
//! intent. `retry_payment` re-enters the pipeline at the step selected by
//! that intent's status and never creates a second intent.

pub mod error_mapper;
pub mod status;

use std::sync::Arc;

use mantis_terminal::{
    CancelPaymentAction, CollectPaymentAction, CollectPaymentEvent, CreatePaymentAction,
    CreatePaymentEvent, ProcessPaymentAction, ProcessPaymentEvent, TerminalClient, TerminalError,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{CreateIntentParams, PaymentIntent, PaymentIntentStatus, money};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use self::error_mapper::{map_capture_error, map_terminal_error};
use self::status::{CardPaymentStatus, PaymentData, PaymentFailureKind};
use crate::backend::PaymentBackend;

/// Default capacity of the status channel handed to the caller
const STATUS_EVENT_BUFFER: usize = 32;

/// A request to take one card-present payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Statement descriptor forwarded to the backend
    pub description: String,
    /// Merchant order being paid
    pub order_id: u64,
    /// Amount in major currency units
    pub amount: Decimal,
    pub currency: String,
    /// Customer e-mail for receipt delivery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

/// Drives payment intents through create → collect → process → capture.
///
/// Stateless between calls: each invocation owns exactly one intent
/// progression, and the caller holds the [`PaymentData`] token between a
/// failure and the retry/cancel decision. The orchestrator is cheap to
/// clone and safe to share.
#[derive(Clone)]
pub struct PaymentOrchestrator {
    terminal: Arc<dyn TerminalClient>,
    backend: Arc<dyn PaymentBackend>,
    create_action: Arc<CreatePaymentAction>,
    collect_action: Arc<CollectPaymentAction>,
    process_action: Arc<ProcessPaymentAction>,
    cancel_action: Arc<CancelPaymentAction>,
    event_buffer: usize,
}

impl PaymentOrchestrator {
    pub fn new(terminal: Arc<dyn TerminalClient>, backend: Arc<dyn PaymentBackend>) -> Self {
        Self {
            create_action: Arc::new(CreatePaymentAction::new(Arc::clone(&terminal))),
            collect_action: Arc::new(CollectPaymentAction::new(Arc::clone(&terminal))),
            process_action: Arc::new(ProcessPaymentAction::new(Arc::clone(&terminal))),
            cancel_action: Arc::new(CancelPaymentAction::new(Arc::clone(&terminal))),
            terminal,
            backend,
            event_buffer: STATUS_EVENT_BUFFER,
        }
    }

    /// Set the capacity of the status channel handed to callers
    pub fn with_event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = capacity.max(1);
        self
    }

    /// Start a new payment and return its live status sequence.
    ///
    /// The stream ends after a terminal event (`PaymentCompleted` or
    /// `PaymentFailed`). Dropping the receiver stops the pipeline at its
    /// next emission.
    pub fn accept_payment(&self, request: PaymentRequest) -> mpsc::Receiver<CardPaymentStatus> {
        let (tx, rx) = mpsc::channel(self.event_buffer);
        let this = self.clone();
        tokio::spawn(async move {
            this.run_payment(request, tx).await;
        });
        rx
    }

    /// Resume a failed payment from its continuation token.
    ///
    /// Re-enters the pipeline at the step selected by the wrapped intent's
    /// status; intent creation is never repeated, so a retry cannot produce
    /// a duplicate intent.
    pub fn retry_payment(
        &self,
        order_id: u64,
        payment_data: PaymentData,
    ) -> mpsc::Receiver<CardPaymentStatus> {
        let (tx, rx) = mpsc::channel(self.event_buffer);
        let this = self.clone();
        tokio::spawn(async move {
            this.drive(payment_data.intent, order_id, &tx).await;
        });
        rx
    }

    /// Cancel a payment held as a continuation token.
    ///
    /// Only intents still waiting for a card or for processing are
    /// cancelable. Once an intent requires capture, a parallel retry may
    /// already have captured it and the cancel is skipped.
    pub async fn cancel_payment(&self, payment_data: PaymentData) {
        match payment_data.intent.status {
            PaymentIntentStatus::RequiresPaymentMethod
            | PaymentIntentStatus::RequiresConfirmation => {
                self.cancel_action.cancel_payment(&payment_data.intent).await;
            }
            status => {
                debug!(
                    intent_id = %payment_data.intent.id,
                    ?status,
                    "skipping cancel for non-cancelable intent"
                );
            }
        }
    }

    #[instrument(skip_all, fields(order_id = request.order_id))]
    async fn run_payment(&self, request: PaymentRequest, events: mpsc::Sender<CardPaymentStatus>) {
        if let Err(e) = money::validate_currency(&request.currency) {
            emit_local_failure(&events, e.to_string()).await;
            return;
        }

        let amount = match money::to_minor_units(request.amount) {
            Ok(amount) => amount,
            Err(e) => {
                emit_local_failure(&events, e.to_string()).await;
                return;
            }
        };

        if !self.terminal.is_initialized() {
            emit_local_failure(&events, "card reader is not connected".to_string()).await;
            return;
        }

        if !emit(&events, CardPaymentStatus::InitializingPayment).await {
            return;
        }

        let params = CreateIntentParams {
            description: request.description,
            amount,
            currency: request.currency.to_ascii_lowercase(),
            customer_email: request.customer_email,
        };
        let Some(intent) = self.create_intent(params, &events).await else {
            return;
        };

        self.drive(intent, request.order_id, &events).await;
    }

    /// Advance the intent through the remaining pipeline steps until
    /// completion or failure. A status the pipeline does not handle ends
    /// the stream without an event.
    async fn drive(
        &self,
        mut intent: PaymentIntent,
        order_id: u64,
        events: &mpsc::Sender<CardPaymentStatus>,
    ) {
        loop {
            match intent.status {
                PaymentIntentStatus::RequiresPaymentMethod => {
                    intent = match self.collect_payment(intent, events).await {
                        Some(updated) => updated,
                        None => return,
                    };
                }
                PaymentIntentStatus::RequiresConfirmation => {
                    intent = match self.process_payment(intent, events).await {
                        Some(updated) => updated,
                        None => return,
                    };
                }
                PaymentIntentStatus::RequiresCapture => {
                    self.capture_payment(intent, order_id, events).await;
                    return;
                }
                status => {
                    warn!(
                        intent_id = %intent.id,
                        ?status,
                        "payment flow ended on unhandled intent status"
                    );
                    return;
                }
            }
        }
    }

    async fn create_intent(
        &self,
        params: CreateIntentParams,
        events: &mpsc::Sender<CardPaymentStatus>,
    ) -> Option<PaymentIntent> {
        let mut stream = self.create_action.create_payment_intent(params).await;
        match stream.recv().await {
            Some(CreatePaymentEvent::Success(intent)) => Some(intent),
            Some(CreatePaymentEvent::Failure(error)) => {
                // no intent exists yet, so there is nothing to resume from
                emit_terminal_failure(events, &error, None).await;
                None
            }
            None => {
                warn!("create intent stream closed without a terminal event");
                None
            }
        }
    }

    async fn collect_payment(
        &self,
        intent: PaymentIntent,
        events: &mpsc::Sender<CardPaymentStatus>,
    ) -> Option<PaymentIntent> {
        if !emit(events, CardPaymentStatus::CollectingPayment).await {
            return None;
        }

        let mut stream = self.collect_action.collect_payment(intent.clone()).await;
        while let Some(event) = stream.recv().await {
            match event {
                CollectPaymentEvent::DisplayMessageRequested(message) => {
                    if !emit(events, CardPaymentStatus::ShowAdditionalInfo { message }).await {
                        return None;
                    }
                }
                CollectPaymentEvent::ReaderInputRequested(options) => {
                    if !emit(events, CardPaymentStatus::WaitingForReaderInput { options }).await {
                        return None;
                    }
                }
                CollectPaymentEvent::Success(updated) => return Some(updated),
                CollectPaymentEvent::Failure(error) => {
                    // prefer the intent the SDK attached to the failure, it
                    // is the freshest snapshot the backend knows about
                    let resume = error.payment_intent.clone().unwrap_or(intent);
                    emit_terminal_failure(events, &error, Some(PaymentData::new(resume))).await;
                    return None;
                }
            }
        }

        warn!(intent_id = %intent.id, "collect payment stream closed without a terminal event");
        None
    }

    async fn process_payment(
        &self,
        intent: PaymentIntent,
        events: &mpsc::Sender<CardPaymentStatus>,
    ) -> Option<PaymentIntent> {
        if !emit(events, CardPaymentStatus::ProcessingPayment).await {
            return None;
        }

        let mut stream = self.process_action.process_payment(intent.clone()).await;
        match stream.recv().await {
            Some(ProcessPaymentEvent::Success(updated)) => Some(updated),
            Some(ProcessPaymentEvent::Failure(error)) => {
                let resume = error.payment_intent.clone().unwrap_or(intent);
                emit_terminal_failure(events, &error, Some(PaymentData::new(resume))).await;
                None
            }
            None => {
                warn!(intent_id = %intent.id, "process payment stream closed without a terminal event");
                None
            }
        }
    }

    async fn capture_payment(
        &self,
        intent: PaymentIntent,
        order_id: u64,
        events: &mpsc::Sender<CardPaymentStatus>,
    ) {
        // data-availability invariant: a completed payment must be able to
        // point at its receipt
        let Some(receipt_url) = intent.receipt_url().map(str::to_string) else {
            emit(
                events,
                CardPaymentStatus::PaymentFailed {
                    kind: PaymentFailureKind::Generic,
                    payment_data: None,
                    message: "ReceiptUrl not available".to_string(),
                },
            )
            .await;
            return;
        };

        if !emit(events, CardPaymentStatus::CapturingPayment).await {
            return;
        }

        match self.backend.capture_payment_intent(order_id, &intent.id).await {
            Ok(()) => {
                info!(intent_id = %intent.id, order_id, "payment captured");
                emit(events, CardPaymentStatus::PaymentCompleted { receipt_url }).await;
            }
            Err(error) => {
                warn!(intent_id = %intent.id, order_id, error = %error, "payment capture failed");
                emit(
                    events,
                    CardPaymentStatus::PaymentFailed {
                        kind: map_capture_error(&error),
                        payment_data: Some(PaymentData::new(intent)),
                        message: error.to_string(),
                    },
                )
                .await;
            }
        }
    }
}

/// Send a status event; returns false when the caller dropped the receiver
/// and the pipeline should stop.
async fn emit(events: &mpsc::Sender<CardPaymentStatus>, status: CardPaymentStatus) -> bool {
    if events.send(status).await.is_err() {
        debug!("status consumer dropped, ending payment flow");
        return false;
    }
    true
}

/// Classify a terminal failure and emit it as the stream's final event
async fn emit_terminal_failure(
    events: &mpsc::Sender<CardPaymentStatus>,
    error: &TerminalError,
    payment_data: Option<PaymentData>,
) {
    let kind = map_terminal_error(error);
    warn!(code = ?error.code, ?kind, "payment step failed: {}", error.message);
    emit(
        events,
        CardPaymentStatus::PaymentFailed {
            kind,
            payment_data,
            message: error.message.clone(),
        },
    )
    .await;
}

/// Emit a failure synthesized locally, with no underlying terminal error
/// and nothing to resume
async fn emit_local_failure(events: &mpsc::Sender<CardPaymentStatus>, message: String) {
    warn!("payment rejected: {}", message);
    emit(
        events,
        CardPaymentStatus::PaymentFailed {
            kind: PaymentFailureKind::Generic,
            payment_data: None,
            message,
        },
    )
    .await;
}
