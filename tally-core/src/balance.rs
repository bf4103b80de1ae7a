//! Minor-unit amount to major-unit balance string.
//!
//! `format_balance(123456789.0)` is `"1.23456789"`. The amount is multiplied by
//! the denomination's scale and rendered with [`to_fixed`]. There is no input
//! validation: NaN and infinities come back as `"NaN"`, `"Infinity"` and
//! `"-Infinity"`, and negative amounts keep their sign.
//!
//! The `_checked` variants reject non-finite input instead. They are opt-in and
//! deliberately stricter than the plain formatter.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::denomination::{Denomination, BALANCE_DECIMALS, MAX_SAFE_INTEGER};
use crate::error::BalanceError;
use crate::fixed::to_fixed;

/// Formatter settings: which minor unit the input is in and how many digits to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceFormatter {
    pub denomination: Denomination,
    pub decimals: u8,
}

impl Default for BalanceFormatter {
    fn default() -> Self {
        Self {
            denomination: Denomination::Satoshi,
            decimals: BALANCE_DECIMALS,
        }
    }
}

impl BalanceFormatter {
    pub const fn new(denomination: Denomination, decimals: u8) -> Self {
        Self {
            denomination,
            decimals,
        }
    }

    /// Format a minor-unit amount. Never fails.
    pub fn format(&self, amount: f64) -> String {
        to_fixed(amount * self.denomination.scale(), self.decimals)
    }

    /// Format a minor-unit amount, rejecting NaN and infinities.
    pub fn format_checked(&self, amount: f64) -> Result<String, BalanceError> {
        if !amount.is_finite() {
            return Err(BalanceError::NonFinite(amount));
        }
        Ok(self.format(amount))
    }
}

/// Format a satoshi amount as coins with 8 decimals.
pub fn format_balance(amount: f64) -> String {
    BalanceFormatter::default().format(amount)
}

/// Like [`format_balance`], but NaN and infinities are an error.
pub fn format_balance_checked(amount: f64) -> Result<String, BalanceError> {
    BalanceFormatter::default().format_checked(amount)
}

/// Whether `amount` is an integer the formatter can represent without loss.
///
/// Outside this range neighbouring amounts share an `f64`, so formatting and
/// parsing back is not guaranteed to recover the input.
pub fn is_exact_amount(amount: f64) -> bool {
    amount.is_finite() && amount.fract() == 0.0 && amount.abs() <= MAX_SAFE_INTEGER
}

/// A satoshi amount that displays as a formatted balance.
///
/// ```
/// use tally_core::Balance;
///
/// assert_eq!(Balance(150_000_000.0).to_string(), "1.50000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(pub f64);

impl From<f64> for Balance {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

/// Only `u32` converts losslessly into `f64`. Wider integer amounts either go
/// through `Balance(amount as f64)`, accepting the nearest double, or through
/// [`crate::format_satoshis`] when every digit must survive.
impl From<u32> for Balance {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

impl Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_balance(self.0))
    }
}
