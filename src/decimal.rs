//! Strict base-10 decimal parsing for externally supplied price/quantity fields.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Error returned when a caller-supplied string is not an acceptable decimal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecimalError {
    /// The input string was empty.
    Empty,
    /// The input used scientific notation (`e`/`E`), which this crate never accepts.
    ScientificNotation,
    /// The input had leading or trailing whitespace.
    Whitespace,
    /// The input carried more than one sign character.
    MultipleSigns,
    /// The underlying decimal parser rejected the input.
    Malformed(String),
}

impl fmt::Display for DecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalError::Empty => write!(f, "decimal input is empty"),
            DecimalError::ScientificNotation => {
                write!(f, "decimal input uses scientific notation, which is not accepted")
            }
            DecimalError::Whitespace => write!(f, "decimal input has leading or trailing whitespace"),
            DecimalError::MultipleSigns => write!(f, "decimal input has more than one sign"),
            DecimalError::Malformed(raw) => write!(f, "decimal input '{raw}' is not a valid number"),
        }
    }
}

impl std::error::Error for DecimalError {}

/// Parses `raw` into a [`Decimal`], rejecting any input that is not a plain
/// base-10 number: no scientific notation, no surrounding whitespace, and at
/// most one sign and one decimal point.
pub fn parse_decimal_strict(raw: &str) -> Result<Decimal, DecimalError> {
    if raw.is_empty() {
        return Err(DecimalError::Empty);
    }
    if raw != raw.trim() {
        return Err(DecimalError::Whitespace);
    }
    if raw.contains(['e', 'E']) {
        return Err(DecimalError::ScientificNotation);
    }

    let sign_count = raw.chars().filter(|c| *c == '+' || *c == '-').count();
    if sign_count > 1 {
        return Err(DecimalError::MultipleSigns);
    }
    if sign_count == 1 && !raw.starts_with('+') && !raw.starts_with('-') {
        return Err(DecimalError::MultipleSigns);
    }

    let digits_and_dot = raw.trim_start_matches(['+', '-']);
    if digits_and_dot.is_empty()
        || !digits_and_dot
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.')
    {
        return Err(DecimalError::Malformed(raw.to_string()));
    }
    if digits_and_dot.matches('.').count() > 1 {
        return Err(DecimalError::Malformed(raw.to_string()));
    }

    Decimal::from_str(raw).map_err(|_| DecimalError::Malformed(raw.to_string()))
}
