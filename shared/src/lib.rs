//! Shared types for the Mantis payments core
//!
//! Domain models and money handling used by both the terminal seam and the
//! payment/refund orchestrators: the payment-intent model, refund request
//! parameters, and decimal-to-minor-unit conversion.

pub mod money;
pub mod payment;
pub mod refund;

// Re-exports
pub use money::{
    ConversionError, SUPPORTED_CURRENCY, is_supported_currency, to_minor_units, validate_currency,
};
pub use payment::{Charge, CreateIntentParams, PaymentIntent, PaymentIntentStatus};
pub use refund::RefundParams;
