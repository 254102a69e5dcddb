//! Refund request parameters
//!
//! A refund targets a settled charge directly, so the parameters carry the
//! charge id rather than a payment intent. The value is immutable and is
//! echoed back inside every refund failure so the caller can re-attempt
//! without re-deriving it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parameters describing one refund request against a charge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundParams {
    /// Charge being refunded
    pub charge_id: String,
    /// Refund amount in major currency units
    pub amount: Decimal,
    pub currency: String,
}
