//! Error types for the hardened and exact-arithmetic paths.
//!
//! The faithful formatter in [`crate::balance`] never fails and has no error type.

use thiserror::Error;

/// Rejections raised by the opt-in strict formatter.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BalanceError {
    #[error("amount is not a finite number (got {0})")]
    NonFinite(f64),
}

/// Failures while reading a decimal or integer amount string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    #[error("amount is empty")]
    Empty,
    #[error("amount contains a sign; negative/positive signs are not allowed")]
    SignNotAllowed,
    #[error("amount contains invalid characters")]
    InvalidCharacters,
    #[error("amount has more than one decimal point")]
    MultipleDecimalPoints,
    #[error("amount has more than {max} decimal places")]
    TooManyDecimals { max: u32 },
    #[error("amount has invalid digits")]
    InvalidDigits,
    #[error("amount arithmetic overflow")]
    Overflow,
}
