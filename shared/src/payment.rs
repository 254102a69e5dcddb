//! Payment intent model - the terminal backend's view of one authorization
//! attempt
//!
//! Intents are created by the terminal backend and replaced (never mutated
//! in place) after every successful transaction step, so each value is a
//! consistent snapshot of where the authorization stands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a payment intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentIntentStatus {
    /// Created, waiting for a card to be presented
    RequiresPaymentMethod,
    /// Card collected, waiting for processing
    RequiresConfirmation,
    /// Authorized, waiting for the merchant backend to capture
    RequiresCapture,
    /// The backend is still working on the intent
    Processing,
    /// Canceled at the terminal or backend
    Canceled,
    /// Captured and finalized
    Succeeded,
}

/// A charge the backend attached to an intent during processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub id: String,
    /// Amount in minor currency units
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One in-flight authorization attempt at the terminal backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub status: PaymentIntentStatus,
    /// Amount in minor currency units
    pub amount: i64,
    pub currency: String,
    pub description: String,
    /// Charges produced by processing; empty until the intent is authorized
    pub charges: Vec<Charge>,
    pub created_at: DateTime<Utc>,
}

impl PaymentIntent {
    /// Receipt URL from the intent's charges, when processing produced one
    pub fn receipt_url(&self) -> Option<&str> {
        self.charges.iter().find_map(|c| c.receipt_url.as_deref())
    }
}

/// Parameters for creating a new payment intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIntentParams {
    pub description: String,
    /// Amount in minor currency units
    pub amount: i64,
    pub currency: String,
    /// Customer e-mail forwarded to the backend for receipt delivery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}
