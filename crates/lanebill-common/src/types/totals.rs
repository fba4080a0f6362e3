//! Totals block shared by quote and invoice responses

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::money::round_currency;

/// Money totals for one pricing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of discountable line amounts
    pub subtotal_discountable: Decimal,
    /// Sum of non-discountable line amounts
    pub subtotal_non_discountable: Decimal,
    /// Discountable + non-discountable, before any discount
    pub subtotal_before_discounts: Decimal,
    /// Sum of all applied discount amounts
    pub total_discount: Decimal,
    /// subtotal_before_discounts - total_discount
    pub after_discounts: Decimal,
    /// Tax on the configured basis, zero when tax is disabled
    pub tax_amount: Decimal,
    /// grand_total - (after_discounts + tax_amount)
    pub rounding_adjustment: Decimal,
    /// Final amount after the rounding policy
    pub grand_total: Decimal,
}

/// Savings versus the no-discount baseline
///
/// Emitted only when a discount actually applied; a run with no applied
/// discount omits the block entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsComparison {
    /// Currency saved, equal to the total discount
    pub savings_amount: Decimal,
    /// Savings as a percent of the before-discount subtotal
    pub savings_percentage: Decimal,
}

impl SavingsComparison {
    /// Build the block from finished totals, or None when nothing applied
    pub fn from_totals(totals: &Totals) -> Option<Self> {
        if totals.total_discount <= Decimal::ZERO {
            return None;
        }
        let savings_percentage = if totals.subtotal_before_discounts.is_zero() {
            Decimal::ZERO
        } else {
            round_currency(
                totals.total_discount / totals.subtotal_before_discounts * Decimal::ONE_HUNDRED,
            )
        };
        Some(Self {
            savings_amount: totals.total_discount,
            savings_percentage,
        })
    }
}
