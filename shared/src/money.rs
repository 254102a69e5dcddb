//! Money conversion utilities using rust_decimal for precision
//!
//! Charge amounts are carried as decimals at the API boundary and as integer
//! minor units (cents) everywhere the terminal backend is involved. The
//! conversion rounds half-up to the currency's precision and refuses to
//! produce a value that does not fit the minor-unit integer width.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

/// The single currency accepted by the payment flow.
// TODO: multi-currency support is pending a product decision; until then
// everything except this code is rejected up front.
pub const SUPPORTED_CURRENCY: &str = "usd";

/// Minor-unit precision of the supported currency (2 decimal places)
const DECIMAL_PLACES: u32 = 2;

/// Minor units per major unit (cents per dollar)
const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Conversion error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Scaled amount does not fit the minor-unit integer range
    #[error("amount {0} overflows the minor-unit range")]
    Overflow(Decimal),

    /// Currency is not accepted by the payment flow
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

/// Check whether a currency code is accepted by the payment flow.
///
/// The comparison is ASCII-case-insensitive, so `"USD"`, `"usd"` and
/// `"Usd"` are all accepted.
pub fn is_supported_currency(code: &str) -> bool {
    code.eq_ignore_ascii_case(SUPPORTED_CURRENCY)
}

/// Check a currency code, returning the rejected code in the error
pub fn validate_currency(code: &str) -> Result<(), ConversionError> {
    if is_supported_currency(code) {
        Ok(())
    } else {
        Err(ConversionError::UnsupportedCurrency(code.to_string()))
    }
}

/// Convert a decimal amount to integer minor units (cents).
///
/// The amount is rounded half-up to 2 decimal places before scaling, so
/// `19.999` becomes `2000` cents and `12.345` becomes `1235` cents.
///
/// Returns [`ConversionError::Overflow`] when the scaled value does not fit
/// in `i64`. Truncating instead would silently corrupt the charged amount,
/// so the conversion is total or it fails.
pub fn to_minor_units(amount: Decimal) -> Result<i64, ConversionError> {
    amount
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
        .and_then(|scaled| scaled.to_i64())
        .ok_or(ConversionError::Overflow(amount))
}
