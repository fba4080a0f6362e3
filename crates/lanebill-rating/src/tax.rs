//! Tax computation and totals finalization

use lanebill_common::{round_currency, RoundingPolicy, Totals};
use rust_decimal::Decimal;

use crate::subtotals::PoolTotals;

/// Tax at `rate` percent of `basis_amount`, at currency precision
pub fn compute_tax(basis_amount: Decimal, rate: Decimal) -> Decimal {
    round_currency(basis_amount * rate / Decimal::ONE_HUNDRED)
}

/// Finalize the totals block
///
/// The rounding policy lands exactly once, here, on the grand total;
/// the difference it introduces is recorded as the rounding adjustment
/// rather than discarded.
pub fn build_totals(
    pools: PoolTotals,
    total_discount: Decimal,
    tax_amount: Decimal,
    rounding: &RoundingPolicy,
) -> Totals {
    let subtotal_before_discounts = pools.subtotal_before_discounts();
    let after_discounts = subtotal_before_discounts - total_discount;
    let unrounded = after_discounts + tax_amount;
    let grand_total = rounding.apply(unrounded);

    Totals {
        subtotal_discountable: pools.discountable,
        subtotal_non_discountable: pools.non_discountable,
        subtotal_before_discounts,
        total_discount,
        after_discounts,
        tax_amount,
        rounding_adjustment: grand_total - unrounded,
        grand_total,
    }
}
