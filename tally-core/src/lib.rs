//! Core library for Tally: minor-unit amounts rendered as major-unit balances.
//!
//! [`format_balance`] is the entry point: a satoshi amount in, an 8-decimal
//! coin string out, never failing. View layers can call it directly or render a
//! [`Balance`] through `Display`.
//!
//! ```
//! use tally_core::{format_balance, format_reward, Denomination};
//!
//! assert_eq!(format_balance(123_456_789.0), "1.23456789");
//! assert_eq!(format_balance(f64::NAN), "NaN");
//! assert_eq!(format_reward(5_000_000_000, Denomination::Wei), "0.00000001");
//! ```

pub mod balance;
pub mod coerce;
pub mod denomination;
pub mod error;
pub mod fixed;
pub mod parser;
pub mod reward;

pub use balance::{
    format_balance, format_balance_checked, is_exact_amount, Balance, BalanceFormatter,
};
pub use coerce::coerce_number;
pub use denomination::{
    Denomination, BALANCE_DECIMALS, MAX_SAFE_INTEGER, SATOSHI_PER_COIN, SATOSHI_SCALE,
};
pub use error::{AmountParseError, BalanceError};
pub use fixed::to_fixed;
pub use parser::{parse_major_units, parse_minor_units};
pub use reward::{format_reward, format_satoshis};
