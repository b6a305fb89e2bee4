//! Payment domain types
//!
//! Raw untrusted input, the normalized request produced by validation, and the
//! processed-payment record the store keeps.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Raw payment submission as it arrives from the caller.
///
/// Every field is optional so that "missing" and "present but invalid" stay
/// distinguishable for the required-checks. Never persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentRequest {
    pub card_number: Option<String>,
    pub expiry_month: Option<i32>,
    pub expiry_year: Option<i32>,
    pub currency: Option<String>,
    pub amount: Option<i64>,
    pub cvv: Option<String>,
}

/// Currencies the gateway accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    GBP,
    USD,
    EUR,
}

impl Currency {
    pub const SUPPORTED: [Currency; 3] = [Currency::GBP, Currency::USD, Currency::EUR];

    /// Exact, case-sensitive code match.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "GBP" => Some(Self::GBP),
            "USD" => Some(Self::USD),
            "EUR" => Some(Self::EUR),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::GBP => "GBP",
            Self::USD => "USD",
            Self::EUR => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Terminal status of a payment submission.
///
/// `Rejected` is assigned only by validation and never reaches the store;
/// `Authorized` and `Declined` come from a well-formed acquirer response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Authorized,
    Declined,
    Rejected,
}

/// A fully-typed payment request. Exists only after validation succeeds.
///
/// The CVV stays a string so leading zeros survive; it must never be parsed
/// to an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPayment {
    pub card_number: String,
    pub expiry_month: u32,
    pub expiry_year: i32,
    pub currency: Currency,
    pub amount: i64,
    pub cvv: String,
}

/// Outcome of a well-formed acquirer response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationResult {
    pub status: PaymentStatus,
    pub authorization_code: Option<String>,
}

/// Immutable record of a payment that reached the acquirer.
///
/// Carries only the masked last four digits of the card number. There is no
/// CVV field: the CVV must not survive past the acquirer call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedPayment {
    pub id: Uuid,
    pub card_number_last_four: String,
    pub expiry_month: u32,
    pub expiry_year: i32,
    pub currency: Currency,
    pub amount: i64,
    pub status: PaymentStatus,
    pub authorization_code: Option<String>,
}
