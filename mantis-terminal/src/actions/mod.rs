//! Transaction actions - one wrapper per hardware interaction
//!
//! Each action runs a single SDK call and republishes its events on a
//! bounded channel that closes after the first terminal outcome, so a
//! misbehaving SDK stream cannot leak events into the next pipeline step.

mod payment;
mod refund;

pub use payment::{
    CancelPaymentAction, CollectPaymentAction, CreatePaymentAction, ProcessPaymentAction,
};
pub use refund::{CollectRefundAction, ProcessRefundAction};

use tokio::sync::mpsc;

/// Capacity of the per-action event channel
const ACTION_EVENT_BUFFER: usize = 16;

/// Event stream items that know whether they end their stream
pub(crate) trait ActionEvent {
    fn is_terminal(&self) -> bool;
}

/// Republish `source` on a fresh channel that closes after the first
/// terminal event, or as soon as the consumer goes away.
pub(crate) fn fuse<E>(mut source: mpsc::Receiver<E>) -> mpsc::Receiver<E>
where
    E: ActionEvent + Send + 'static,
{
    let (tx, rx) = mpsc::channel(ACTION_EVENT_BUFFER);
    tokio::spawn(async move {
        while let Some(event) = source.recv().await {
            let done = event.is_terminal();
            if tx.send(event).await.is_err() {
                tracing::debug!("action event consumer dropped, stopping forwarding");
                break;
            }
            if done {
                break;
            }
        }
    });
    rx
}
