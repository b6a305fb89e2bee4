//! Payment request validation
//!
//! Field rules are evaluated in a fixed order with stop-on-first-failure
//! semantics, both within a field's rule chain and across fields, so a given
//! request always surfaces the same single error. The current instant is an
//! explicit argument; callers pass `Utc::now()`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

use crate::error::ValidationError;
use crate::payments::types::{Currency, PaymentRequest};

/// Validates a raw payment request.
///
/// Field order: CardNumber, ExpiryMonth, ExpiryYear, Currency, Amount, Cvv.
/// Returns the first failing rule's field and message, or `Ok(())` when every
/// rule passes.
pub fn validate(request: &PaymentRequest, now: DateTime<Utc>) -> Result<(), ValidationError> {
    check_card_number(request.card_number.as_deref())?;
    check_expiry_month(request.expiry_month)?;
    check_expiry_year(request.expiry_month, request.expiry_year, now)?;
    check_currency(request.currency.as_deref())?;
    check_amount(request.amount)?;
    check_cvv(request.cvv.as_deref())?;
    Ok(())
}

/// Missing, empty and whitespace-only strings all count as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn all_digits(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

fn check_card_number(card_number: Option<&str>) -> Result<(), ValidationError> {
    const FIELD: &str = "CardNumber";

    let Some(value) = present(card_number) else {
        return Err(ValidationError::new(FIELD, "Card number is required."));
    };
    if !(14..=19).contains(&value.chars().count()) {
        return Err(ValidationError::new(
            FIELD,
            "Card number must be 14-19 characters long.",
        ));
    }
    if !all_digits(value) {
        return Err(ValidationError::new(
            FIELD,
            "Card number must only contain numeric characters.",
        ));
    }
    Ok(())
}

fn check_expiry_month(month: Option<i32>) -> Result<(), ValidationError> {
    const FIELD: &str = "ExpiryMonth";

    let Some(month) = month else {
        return Err(ValidationError::new(FIELD, "Expiry month is required."));
    };
    if !(1..=12).contains(&month) {
        return Err(ValidationError::new(
            FIELD,
            "Expiry month must be between 1 and 12.",
        ));
    }
    Ok(())
}

fn check_expiry_year(
    month: Option<i32>,
    year: Option<i32>,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    const FIELD: &str = "ExpiryYear";

    let Some(year) = year else {
        return Err(ValidationError::new(FIELD, "Expiry year is required."));
    };
    if year < now.year() {
        return Err(ValidationError::new(
            FIELD,
            "Expiry year must not be in the past.",
        ));
    }
    // The month field was validated before this one, so a present month is
    // already in 1..=12.
    if let Some(month) = month {
        if !expiry_is_in_future(month as u32, year, now) {
            return Err(ValidationError::new(
                FIELD,
                "Expiry date must be in the future.",
            ));
        }
    }
    Ok(())
}

fn check_currency(currency: Option<&str>) -> Result<(), ValidationError> {
    const FIELD: &str = "Currency";

    let Some(value) = present(currency) else {
        return Err(ValidationError::new(FIELD, "Currency is required."));
    };
    if value.chars().count() != 3 {
        return Err(ValidationError::new(
            FIELD,
            "Currency must be 3 characters long.",
        ));
    }
    if Currency::from_code(value).is_none() {
        let supported = Currency::SUPPORTED
            .iter()
            .map(|c| c.code())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(ValidationError::new(
            FIELD,
            format!("Currency must be one of: {supported}."),
        ));
    }
    Ok(())
}

fn check_amount(amount: Option<i64>) -> Result<(), ValidationError> {
    const FIELD: &str = "Amount";

    let Some(amount) = amount else {
        return Err(ValidationError::new(FIELD, "Amount is required."));
    };
    if amount <= 0 {
        return Err(ValidationError::new(
            FIELD,
            "Amount must be greater than zero.",
        ));
    }
    Ok(())
}

fn check_cvv(cvv: Option<&str>) -> Result<(), ValidationError> {
    const FIELD: &str = "Cvv";

    let Some(value) = present(cvv) else {
        return Err(ValidationError::new(FIELD, "CVV is required."));
    };
    if !(3..=4).contains(&value.chars().count()) {
        return Err(ValidationError::new(
            FIELD,
            "CVV must be 3-4 characters long.",
        ));
    }
    if !all_digits(value) {
        return Err(ValidationError::new(
            FIELD,
            "CVV must only contain numeric characters.",
        ));
    }
    Ok(())
}

/// A card expires at the end of its expiry month: the last calendar day of
/// (month, year) must lie strictly after the current instant.
///
/// Dates that cannot be represented (absurdly large years) fail the check
/// rather than panicking.
fn expiry_is_in_future(month: u32, year: i32, now: DateTime<Utc>) -> bool {
    match last_day_of_month(year, month) {
        Some(last_day) => last_day.and_time(NaiveTime::MIN).and_utc() > now,
        None => false,
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()
    }

    fn valid_request() -> PaymentRequest {
        PaymentRequest {
            card_number: Some("12345678900876".to_string()),
            expiry_month: Some(4),
            expiry_year: Some(2027),
            currency: Some("GBP".to_string()),
            amount: Some(100),
            cvv: Some("123".to_string()),
        }
    }

    fn expect_error(request: &PaymentRequest, field: &str, message: &str) {
        let err = validate(request, fixed_now()).unwrap_err();
        assert_eq!(err.field, field);
        assert_eq!(err.message, message);
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate(&valid_request(), fixed_now()).is_ok());
    }

    #[test]
    fn card_number_missing_empty_or_whitespace_is_required() {
        for card_number in [None, Some("".to_string()), Some("   ".to_string()), Some("\n".to_string())] {
            let request = PaymentRequest {
                card_number,
                ..valid_request()
            };
            expect_error(&request, "CardNumber", "Card number is required.");
        }
    }

    #[test]
    fn card_number_length_bounds() {
        for card_number in ["1234567890123", "12345678901234567890"] {
            let request = PaymentRequest {
                card_number: Some(card_number.to_string()),
                ..valid_request()
            };
            expect_error(
                &request,
                "CardNumber",
                "Card number must be 14-19 characters long.",
            );
        }
    }

    #[test]
    fn card_number_must_be_numeric() {
        let request = PaymentRequest {
            card_number: Some("1234567890123x".to_string()),
            ..valid_request()
        };
        expect_error(
            &request,
            "CardNumber",
            "Card number must only contain numeric characters.",
        );
    }

    #[test]
    fn card_number_length_rule_runs_before_numeric_rule() {
        let request = PaymentRequest {
            card_number: Some("12ab".to_string()),
            ..valid_request()
        };
        expect_error(
            &request,
            "CardNumber",
            "Card number must be 14-19 characters long.",
        );
    }

    #[test]
    fn expiry_month_out_of_range() {
        for month in [0, 13, -1] {
            let request = PaymentRequest {
                expiry_month: Some(month),
                ..valid_request()
            };
            expect_error(&request, "ExpiryMonth", "Expiry month must be between 1 and 12.");
        }
    }

    #[test]
    fn expiry_month_missing() {
        let request = PaymentRequest {
            expiry_month: None,
            ..valid_request()
        };
        expect_error(&request, "ExpiryMonth", "Expiry month is required.");
    }

    #[test]
    fn expiry_year_in_the_past() {
        let request = PaymentRequest {
            expiry_year: Some(2025),
            ..valid_request()
        };
        expect_error(&request, "ExpiryYear", "Expiry year must not be in the past.");
    }

    #[test]
    fn expiry_in_current_month_is_rejected_on_its_last_day() {
        // 23:00 on the last day of August; the last calendar day of the
        // expiry month no longer lies strictly in the future.
        let now = Utc.with_ymd_and_hms(2026, 8, 31, 23, 0, 0).unwrap();
        let request = PaymentRequest {
            expiry_month: Some(8),
            expiry_year: Some(2026),
            ..valid_request()
        };
        let err = validate(&request, now).unwrap_err();
        assert_eq!(err.field, "ExpiryYear");
        assert_eq!(err.message, "Expiry date must be in the future.");
    }

    #[test]
    fn expiry_in_next_month_is_accepted() {
        let now = Utc.with_ymd_and_hms(2026, 8, 31, 23, 0, 0).unwrap();
        let request = PaymentRequest {
            expiry_month: Some(9),
            expiry_year: Some(2026),
            ..valid_request()
        };
        assert!(validate(&request, now).is_ok());
    }

    #[test]
    fn december_expiry_rolls_into_next_year() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let request = PaymentRequest {
            expiry_month: Some(12),
            expiry_year: Some(2026),
            ..valid_request()
        };
        assert!(validate(&request, now).is_ok());
    }

    #[test]
    fn absurd_expiry_year_fails_without_panicking() {
        let request = PaymentRequest {
            expiry_month: Some(12),
            expiry_year: Some(i32::MAX),
            ..valid_request()
        };
        expect_error(&request, "ExpiryYear", "Expiry date must be in the future.");
    }

    #[test]
    fn unsupported_currency_lists_the_supported_set() {
        let request = PaymentRequest {
            currency: Some("JYP".to_string()),
            ..valid_request()
        };
        expect_error(&request, "Currency", "Currency must be one of: GBP, USD, EUR.");
    }

    #[test]
    fn currency_length_rule_runs_before_set_membership() {
        for currency in ["GB", "GBPS"] {
            let request = PaymentRequest {
                currency: Some(currency.to_string()),
                ..valid_request()
            };
            expect_error(&request, "Currency", "Currency must be 3 characters long.");
        }
    }

    #[test]
    fn amount_must_be_positive() {
        for amount in [0, -5] {
            let request = PaymentRequest {
                amount: Some(amount),
                ..valid_request()
            };
            expect_error(&request, "Amount", "Amount must be greater than zero.");
        }
    }

    #[test]
    fn amount_missing() {
        let request = PaymentRequest {
            amount: None,
            ..valid_request()
        };
        expect_error(&request, "Amount", "Amount is required.");
    }

    #[test]
    fn cvv_rules() {
        let too_short = PaymentRequest {
            cvv: Some("01".to_string()),
            ..valid_request()
        };
        expect_error(&too_short, "Cvv", "CVV must be 3-4 characters long.");

        let not_numeric = PaymentRequest {
            cvv: Some("0f6".to_string()),
            ..valid_request()
        };
        expect_error(&not_numeric, "Cvv", "CVV must only contain numeric characters.");

        let leading_zeros = PaymentRequest {
            cvv: Some("005".to_string()),
            ..valid_request()
        };
        assert!(validate(&leading_zeros, fixed_now()).is_ok());
    }

    #[test]
    fn cvv_missing_empty_or_whitespace_is_required() {
        for cvv in [None, Some("".to_string()), Some(" ".to_string()), Some("\n".to_string())] {
            let request = PaymentRequest {
                cvv,
                ..valid_request()
            };
            expect_error(&request, "Cvv", "CVV is required.");
        }
    }

    #[test]
    fn first_failing_field_wins() {
        // Both the card number and the CVV are invalid; CardNumber is earlier
        // in the field order.
        let request = PaymentRequest {
            card_number: Some("123".to_string()),
            cvv: Some("xx".to_string()),
            ..valid_request()
        };
        expect_error(
            &request,
            "CardNumber",
            "Card number must be 14-19 characters long.",
        );
    }

    #[test]
    fn identical_input_and_clock_produce_identical_errors() {
        let request = PaymentRequest {
            currency: Some("JYP".to_string()),
            cvv: Some("1".to_string()),
            ..valid_request()
        };
        let first = validate(&request, fixed_now()).unwrap_err();
        let second = validate(&request, fixed_now()).unwrap_err();
        assert_eq!(first, second);
    }
}
