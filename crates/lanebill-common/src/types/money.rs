//! Currency rounding helpers and the grand-total rounding policy

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::CURRENCY_PRECISION;

/// Round an amount to currency precision, half-up
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

/// Direction applied when rounding the grand total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Half-up to the nearest step
    #[default]
    Round,
    /// Always toward negative infinity
    Floor,
    /// Always toward positive infinity
    Ceil,
}

/// Rounding applied once, at the grand-total step
///
/// Line extended costs and discount applications are quantized to currency
/// precision as they are produced and never re-rounded; this policy touches
/// only the final total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingPolicy {
    /// Rounding direction
    #[serde(default)]
    pub mode: RoundingMode,
    /// Decimal places kept in the grand total
    #[serde(default = "default_precision")]
    pub precision: u32,
}

fn default_precision() -> u32 {
    CURRENCY_PRECISION
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self {
            mode: RoundingMode::Round,
            precision: CURRENCY_PRECISION,
        }
    }
}

impl RoundingPolicy {
    /// Apply the policy to an amount
    pub fn apply(&self, amount: Decimal) -> Decimal {
        let strategy = match self.mode {
            RoundingMode::Round => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::Floor => RoundingStrategy::ToNegativeInfinity,
            RoundingMode::Ceil => RoundingStrategy::ToPositiveInfinity,
        };
        amount.round_dp_with_strategy(self.precision, strategy)
    }
}
