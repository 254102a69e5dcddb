//! Refund-side transaction actions

use std::sync::Arc;

use shared::RefundParams;
use tokio::sync::mpsc;
use tracing::instrument;

use super::{ActionEvent, fuse};
use crate::client::{RefundEvent, TerminalClient};

impl ActionEvent for RefundEvent {
    fn is_terminal(&self) -> bool {
        true
    }
}

/// Runs the card interaction for a refund
pub struct CollectRefundAction {
    terminal: Arc<dyn TerminalClient>,
}

impl CollectRefundAction {
    pub fn new(terminal: Arc<dyn TerminalClient>) -> Self {
        Self { terminal }
    }

    /// Collect the refund payment method, reporting the outcome as an
    /// event stream
    #[instrument(skip(self, params), fields(charge_id = %params.charge_id))]
    pub async fn collect_refund(&self, params: RefundParams) -> mpsc::Receiver<RefundEvent> {
        fuse(self.terminal.collect_refund(params).await)
    }
}

/// Processes the refund collected by [`CollectRefundAction`]
pub struct ProcessRefundAction {
    terminal: Arc<dyn TerminalClient>,
}

impl ProcessRefundAction {
    pub fn new(terminal: Arc<dyn TerminalClient>) -> Self {
        Self { terminal }
    }

    /// Process the pending refund, reporting the outcome as an event stream
    #[instrument(skip(self))]
    pub async fn process_refund(&self) -> mpsc::Receiver<RefundEvent> {
        fuse(self.terminal.process_refund().await)
    }
}
