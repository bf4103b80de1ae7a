//! Unit constants and the minor-unit denominations a balance can be expressed in.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Conversion factor: 1 coin = 100,000,000 satoshis.
pub const SATOSHI_PER_COIN: u64 = 100_000_000;

/// Multiplier applied to a satoshi amount to get coins.
///
/// Kept as a literal rather than `1.0 / 1e8`: the formatter multiplies by this
/// exact double, and dividing by `1e8` instead can differ in the last bit.
pub const SATOSHI_SCALE: f64 = 0.000_000_01;

/// Fractional digits in every formatted balance.
pub const BALANCE_DECIMALS: u8 = 8;

/// Largest integer `n` such that `n` and `n + 1` are both exact in an `f64`.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Minor unit an amount is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    /// 10^8 per coin.
    #[default]
    Satoshi,
    /// 10^9 per coin (a.k.a. shannon).
    Gwei,
    /// 10^18 per coin.
    Wei,
}

impl Denomination {
    /// Number of minor-unit decimal places in one major unit.
    pub const fn decimals(self) -> u32 {
        match self {
            Denomination::Satoshi => 8,
            Denomination::Gwei => 9,
            Denomination::Wei => 18,
        }
    }

    /// Minor units per major unit.
    pub const fn units_per_coin(self) -> u128 {
        10_u128.pow(self.decimals())
    }

    /// Floating-point multiplier from minor to major units.
    pub const fn scale(self) -> f64 {
        match self {
            Denomination::Satoshi => SATOSHI_SCALE,
            Denomination::Gwei => 0.000_000_001,
            Denomination::Wei => 0.000_000_000_000_000_001,
        }
    }

    /// Stable string identifier used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Denomination::Satoshi => "satoshi",
            Denomination::Gwei => "gwei",
            Denomination::Wei => "wei",
        }
    }
}

impl Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
