//! Card number masking

/// Returns the trailing four digits of a card number, as a string.
///
/// The suffix is taken from the digit string, never via numeric modulo: a
/// modulo of `12345678900876` yields `876` and silently drops the leading
/// zero.
///
/// Callers must only pass all-digit strings of at least four characters,
/// which the request validator guarantees.
pub fn last_four(card_number: &str) -> String {
    card_number[card_number.len() - 4..].to_string()
}
