//! Exact formatting of integer minor-unit amounts (block rewards, payouts).
//!
//! Unlike [`crate::balance`] this never touches floating point: the amount is
//! divided by `10^decimals` in integer arithmetic and rounded half away from zero
//! to [`BALANCE_DECIMALS`] places.

use crate::denomination::{Denomination, BALANCE_DECIMALS};

/// Format an integer amount of `denomination` units as coins with 8 decimals.
pub fn format_reward(amount: i128, denomination: Denomination) -> String {
    let magnitude = amount.unsigned_abs();
    let excess = denomination
        .decimals()
        .saturating_sub(u32::from(BALANCE_DECIMALS));
    let divisor = 10_u128.pow(excess);

    let mut scaled = magnitude / divisor;
    let remainder = magnitude % divisor;
    // remainder < divisor <= 10^10, so doubling cannot overflow.
    if remainder * 2 >= divisor {
        scaled += 1;
    }

    let per_coin = 10_u128.pow(u32::from(BALANCE_DECIMALS));
    let whole = scaled / per_coin;
    let frac = scaled % per_coin;
    let sign = if amount < 0 { "-" } else { "" };

    format!("{sign}{whole}.{frac:08}")
}

/// Format an unsigned satoshi amount exactly.
pub fn format_satoshis(amount: u64) -> String {
    format_reward(i128::from(amount), Denomination::Satoshi)
}
