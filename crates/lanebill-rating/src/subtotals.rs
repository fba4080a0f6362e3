//! Bucket and pool aggregation over priced line items

use lanebill_common::{InvoiceLineItem, QuoteLineItem, QuoteSubtotals, ServiceCategory};
use rust_decimal::Decimal;

/// Pool sums feeding the discount pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolTotals {
    /// Sum of line amounts open to discounts
    pub discountable: Decimal,
    /// Sum of line amounts closed to discounts
    pub non_discountable: Decimal,
}

impl PoolTotals {
    /// Discountable + non-discountable
    pub fn subtotal_before_discounts(&self) -> Decimal {
        self.discountable + self.non_discountable
    }
}

/// Roll quote lines up into per-category buckets
///
/// A bucket no line contributed to stays absent. Every quote line is
/// discountable, so the non-discountable pool is always zero here.
pub fn quote_subtotals(lines: &[QuoteLineItem]) -> QuoteSubtotals {
    let mut subtotals = QuoteSubtotals::default();

    for line in lines {
        let bucket = match line.category {
            ServiceCategory::Receiving => &mut subtotals.receiving,
            ServiceCategory::Fulfillment => &mut subtotals.fulfillment,
            ServiceCategory::Storage => &mut subtotals.storage,
            ServiceCategory::Vas => &mut subtotals.vas,
            ServiceCategory::Surcharge => &mut subtotals.surcharges,
        };
        *bucket = Some(bucket.unwrap_or(Decimal::ZERO) + line.extended_cost);
        subtotals.total_discountable += line.extended_cost;
    }

    subtotals
}

/// Split invoice lines into pools by each line's discountable flag
///
/// The category plays no part here; an invoice line lands in a pool on
/// its flag alone.
pub fn invoice_pools(lines: &[InvoiceLineItem]) -> PoolTotals {
    let mut pools = PoolTotals {
        discountable: Decimal::ZERO,
        non_discountable: Decimal::ZERO,
    };

    for line in lines {
        if line.discountable {
            pools.discountable += line.extended_cost;
        } else {
            pools.non_discountable += line.extended_cost;
        }
    }

    pools
}
