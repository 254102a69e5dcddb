//! # mantis-payments
//!
//! Card-present payment and refund orchestration.
//!
//! ## Scope
//!
//! This crate owns the transaction policy of the payment core:
//! - [`PaymentOrchestrator`] drives one payment intent through
//!   create → collect → process → capture, reporting progress as a live
//!   [`CardPaymentStatus`] sequence, with retry and cancellation entry
//!   points gated by intent status
//! - [`RefundOrchestrator`] drives a standalone refund through
//!   collect → process
//! - the failure classifiers that fold raw terminal/backend errors into the
//!   closed [`PaymentFailureKind`] / [`RefundFailureKind`] taxonomies; raw
//!   hardware errors never cross this crate's boundary
//! - [`PaymentBackend`], the port over the merchant order store that
//!   captures authorized intents
//!
//! Hardware interaction itself lives below this crate, in mantis-terminal.

pub mod backend;
pub mod payment;
pub mod refund;

// Re-exports
pub use backend::{CaptureError, PaymentBackend};
pub use payment::status::{CardPaymentStatus, PaymentData, PaymentFailureKind};
pub use payment::{PaymentOrchestrator, PaymentRequest};
pub use refund::RefundOrchestrator;
pub use refund::status::{
    CardInteracRefundStatus, DeclineReason, RefundFailure, RefundFailureKind,
};
