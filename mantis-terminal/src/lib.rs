//! # mantis-terminal
//!
//! Card-reader terminal seam - low-level terminal interaction only.
//!
//! ## Scope
//!
//! This crate handles HOW the flow talks to the card-reader terminal:
//! - the [`TerminalClient`] port over the external terminal SDK
//! - per-step transaction actions that expose each hardware interaction as
//!   a bounded event stream carrying exactly one terminal outcome
//! - the low-level terminal error model (error codes, decline details)
//!
//! Transaction policy (WHAT the steps mean, how failures are classified,
//! when a step may be retried) stays in application code:
//! - payment/refund orchestration → mantis-payments
//!
//! ## Example
//!
//! ```ignore
//! use mantis_terminal::{CollectPaymentAction, CollectPaymentEvent};
//!
//! let action = CollectPaymentAction::new(terminal);
//! let mut events = action.collect_payment(intent).await;
//! while let Some(event) = events.recv().await {
//!     match event {
//!         CollectPaymentEvent::DisplayMessageRequested(msg) => show(msg),
//!         CollectPaymentEvent::Success(intent) => break,
//!         // ...
//!     }
//! }
//! ```

mod actions;
mod client;
mod error;

// Re-exports
pub use actions::{
    CancelPaymentAction, CollectPaymentAction, CollectRefundAction, CreatePaymentAction,
    ProcessPaymentAction, ProcessRefundAction,
};
pub use client::{
    CollectPaymentEvent, CreatePaymentEvent, ProcessPaymentEvent, RefundEvent, TerminalClient,
};
pub use error::{BackendApiError, TerminalError, TerminalErrorCode, TerminalResult};
