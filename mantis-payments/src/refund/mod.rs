//! Refund orchestration - drives a standalone Interac refund
//!
//! A refund is a two-step pipeline: collect the card interaction, then
//! process the refund. There is no continuation token and no internal
//! retry; a failure terminates the flow and carries the original
//! [`RefundParams`] so the caller can simply re-invoke with them.

pub mod error_mapper;
pub mod status;

use std::sync::Arc;

use mantis_terminal::{CollectRefundAction, ProcessRefundAction, RefundEvent, TerminalClient};
use rust_decimal::Decimal;
use shared::RefundParams;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

use self::error_mapper::map_terminal_error;
use self::status::{CardInteracRefundStatus, RefundFailure, RefundFailureKind};

/// Default capacity of the status channel handed to the caller
const STATUS_EVENT_BUFFER: usize = 8;

/// Drives standalone refunds through collect → process
#[derive(Clone)]
pub struct RefundOrchestrator {
    collect_action: Arc<CollectRefundAction>,
    process_action: Arc<ProcessRefundAction>,
    event_buffer: usize,
}

impl RefundOrchestrator {
    pub fn new(terminal: Arc<dyn TerminalClient>) -> Self {
        Self {
            collect_action: Arc::new(CollectRefundAction::new(Arc::clone(&terminal))),
            process_action: Arc::new(ProcessRefundAction::new(terminal)),
            event_buffer: STATUS_EVENT_BUFFER,
        }
    }

    /// Set the capacity of the status channel handed to callers
    pub fn with_event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = capacity.max(1);
        self
    }

    /// Start a refund and return its live status sequence.
    ///
    /// The stream ends after `RefundSuccess` or `RefundFailure`.
    pub fn refund_interac_payment(
        &self,
        params: RefundParams,
    ) -> mpsc::Receiver<CardInteracRefundStatus> {
        let (tx, rx) = mpsc::channel(self.event_buffer);
        let this = self.clone();
        tokio::spawn(async move {
            this.run_refund(params, tx).await;
        });
        rx
    }

    #[instrument(skip_all, fields(charge_id = %params.charge_id))]
    async fn run_refund(&self, params: RefundParams, events: mpsc::Sender<CardInteracRefundStatus>) {
        if let Err(message) = validate_refund_params(&params) {
            warn!("refund rejected: {}", message);
            emit(
                &events,
                CardInteracRefundStatus::RefundFailure(RefundFailure {
                    kind: RefundFailureKind::Generic,
                    message,
                    refund_params: params,
                }),
            )
            .await;
            return;
        }

        if !emit(&events, CardInteracRefundStatus::CollectingRefund).await {
            return;
        }
        let mut stream = self.collect_action.collect_refund(params.clone()).await;
        if !self.await_step(&params, &events, &mut stream, "collect refund").await {
            return;
        }

        if !emit(&events, CardInteracRefundStatus::ProcessingRefund).await {
            return;
        }
        let mut stream = self.process_action.process_refund().await;
        if !self.await_step(&params, &events, &mut stream, "process refund").await {
            return;
        }

        emit(&events, CardInteracRefundStatus::RefundSuccess).await;
    }

    /// Wait for one refund step to finish. Returns false when the flow must
    /// stop, either because the step failed (a classified `RefundFailure`
    /// was emitted) or the stream/consumer went away.
    async fn await_step(
        &self,
        params: &RefundParams,
        events: &mpsc::Sender<CardInteracRefundStatus>,
        stream: &mut mpsc::Receiver<RefundEvent>,
        step: &str,
    ) -> bool {
        match stream.recv().await {
            Some(RefundEvent::Success) => true,
            Some(RefundEvent::Failure(error)) => {
                let failure = map_terminal_error(params, &error);
                warn!(code = ?error.code, kind = ?failure.kind, "{} failed: {}", step, error.message);
                emit(events, CardInteracRefundStatus::RefundFailure(failure)).await;
                false
            }
            None => {
                warn!("{} stream closed without a terminal event", step);
                false
            }
        }
    }
}

fn validate_refund_params(params: &RefundParams) -> Result<(), String> {
    if params.charge_id.trim().is_empty() {
        return Err("refund charge id must not be empty".to_string());
    }
    if params.amount <= Decimal::ZERO {
        return Err(format!(
            "refund amount must be positive, got {}",
            params.amount
        ));
    }
    Ok(())
}

/// Send a status event; returns false when the caller dropped the receiver
async fn emit(
    events: &mpsc::Sender<CardInteracRefundStatus>,
    status: CardInteracRefundStatus,
) -> bool {
    if events.send(status).await.is_err() {
        debug!("status consumer dropped, ending refund flow");
        return false;
    }
    true
}
