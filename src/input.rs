//! Text input parsing.
//!
//! Front ends receive MTBF and time as text. These helpers turn that text
//! into validated numbers and report anything unusable as
//! [`ReliabilityError::InvalidParameter`], so the caller has a single error
//! kind to turn into a user-facing message.

use crate::error::{ReliabilityError, Result};
use crate::exponential::{validate_mtbf, validate_time};

/// Parses a real number, trimming surrounding whitespace.
///
/// A single `,` is read as the decimal separator when the text has no `.`.
///
/// # Examples
///
/// ```
/// use u_reliability::input::parse_number;
///
/// assert_eq!(parse_number("mtbf", " 500 ").unwrap(), 500.0);
/// assert_eq!(parse_number("t", "12,5").unwrap(), 12.5);
/// assert!(parse_number("t", "abc").is_err());
/// assert!(parse_number("t", "").is_err());
/// ```
pub fn parse_number(name: &'static str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ReliabilityError::invalid(name, "\"\"", "a number is required"));
    }
    let normalized = if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };
    normalized
        .parse::<f64>()
        .map_err(|_| ReliabilityError::invalid(name, format!("{text:?}"), "not a number"))
}

/// Parses an MTBF: a positive finite number.
pub fn parse_mtbf(text: &str) -> Result<f64> {
    validate_mtbf(parse_number("mtbf", text)?)
}

/// Parses a time: a non-negative finite number.
pub fn parse_time(text: &str) -> Result<f64> {
    validate_time(parse_number("t", text)?)
}
