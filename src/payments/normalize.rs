//! Raw request coercion
//!
//! Turns a validated raw request into the strictly-typed form. No rules are
//! re-checked here; the request validator must have accepted the input first.

use crate::error::{AppError, AppResult};
use crate::payments::types::{Currency, NormalizedPayment, PaymentRequest};

/// Coerces a validated request into a `NormalizedPayment`.
///
/// Calling this on input the validator has not accepted is a programming
/// error and yields `AppError::Internal`, never a client-facing rejection.
pub fn normalize(request: &PaymentRequest) -> AppResult<NormalizedPayment> {
    let card_number = require(request.card_number.as_deref(), "card_number")?;
    let expiry_month = require(request.expiry_month, "expiry_month")?;
    let expiry_year = require(request.expiry_year, "expiry_year")?;
    let currency_code = require(request.currency.as_deref(), "currency")?;
    let amount = require(request.amount, "amount")?;
    let cvv = require(request.cvv.as_deref(), "cvv")?;

    let currency = Currency::from_code(currency_code).ok_or_else(|| {
        AppError::internal(format!("normalize called with unknown currency '{currency_code}'"))
    })?;

    Ok(NormalizedPayment {
        card_number: card_number.to_string(),
        expiry_month: expiry_month as u32,
        expiry_year,
        currency,
        amount,
        cvv: cvv.to_string(),
    })
}

fn require<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::internal(format!("normalize called with missing field '{field}'")))
}
