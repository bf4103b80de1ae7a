//! Decimal coin strings back into integer minor units, with strict integer arithmetic.

use crate::denomination::Denomination;
use crate::error::AmountParseError;

fn all_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

fn parse_u128_digits(s: &str) -> Result<u128, AmountParseError> {
    if s.is_empty() {
        return Ok(0);
    }
    if !all_digits(s) {
        return Err(AmountParseError::InvalidDigits);
    }
    s.parse::<u128>().map_err(|_| AmountParseError::Overflow)
}

/// Parse a decimal major-unit string (e.g. `"1.23456789"`) into minor units.
///
/// No floating-point math is involved. Signs are rejected, and so are more
/// fractional digits than `denomination` has.
pub fn parse_major_units(
    input: &str,
    denomination: Denomination,
) -> Result<u128, AmountParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AmountParseError::Empty);
    }

    if s.starts_with('-') || s.starts_with('+') {
        return Err(AmountParseError::SignNotAllowed);
    }

    if !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(AmountParseError::InvalidCharacters);
    }

    if s.chars().filter(|c| *c == '.').count() > 1 {
        return Err(AmountParseError::MultipleDecimalPoints);
    }

    let (whole_str, frac_str) = s.split_once('.').unwrap_or((s, ""));
    if whole_str.is_empty() && frac_str.is_empty() {
        return Err(AmountParseError::InvalidDigits);
    }

    let decimals = denomination.decimals();
    let max_frac = usize::try_from(decimals).map_err(|_| AmountParseError::Overflow)?;
    if frac_str.len() > max_frac {
        return Err(AmountParseError::TooManyDecimals { max: decimals });
    }

    let whole = parse_u128_digits(whole_str)?;
    let whole_units = whole
        .checked_mul(denomination.units_per_coin())
        .ok_or(AmountParseError::Overflow)?;

    let padded = format!("{frac_str:0<max_frac$}");
    let frac_units = parse_u128_digits(&padded)?;

    whole_units
        .checked_add(frac_units)
        .ok_or(AmountParseError::Overflow)
}

/// Parse an integer minor-unit string with an optional sign.
pub fn parse_minor_units(input: &str) -> Result<i128, AmountParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AmountParseError::Empty);
    }

    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    if digits.is_empty() || !all_digits(digits) {
        return Err(AmountParseError::InvalidCharacters);
    }

    s.parse::<i128>().map_err(|_| AmountParseError::Overflow)
}
