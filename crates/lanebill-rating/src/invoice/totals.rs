//! Invoice totals over already-priced lines

use lanebill_common::{
    InvoiceLineItem, InvoiceTaxBasis, InvoiceTotals, InvoiceTotalsRequest, Result,
    SavingsComparison,
};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::discounts::{apply_discounts, PoolLine};
use crate::subtotals::invoice_pools;
use crate::tax::{build_totals, compute_tax};

/// Computes invoice totals
///
/// Lines arrive priced per unit and leave extended, pooled by their
/// discountable flag, discounted, and taxed.
pub struct InvoiceCalculator;

impl InvoiceCalculator {
    /// Compute totals for one invoice
    #[instrument(skip(request), fields(invoice_id = %request.invoice_id, lines = request.lines.len()))]
    pub fn calculate(request: &InvoiceTotalsRequest) -> Result<InvoiceTotals> {
        request.validate()?;

        let line_items: Vec<InvoiceLineItem> =
            request.lines.iter().map(|line| line.price()).collect();
        let pools = invoice_pools(&line_items);
        debug!(
            discountable = %pools.discountable,
            non_discountable = %pools.non_discountable,
            "pooled invoice lines"
        );

        let pool_lines: Vec<PoolLine> = line_items
            .iter()
            .map(|line| PoolLine {
                line_id: Some(line.line_id.clone()),
                category: line.category,
                amount: line.extended_cost,
                discountable: line.discountable,
            })
            .collect();
        let outcome = apply_discounts(&pool_lines, &request.discounts)?;

        let tax_amount = if request.tax.enabled {
            let basis_amount = match request.tax.basis {
                InvoiceTaxBasis::Subtotal => pools.subtotal_before_discounts(),
                InvoiceTaxBasis::AfterDiscounts => {
                    pools.subtotal_before_discounts() - outcome.total_discount
                }
            };
            compute_tax(basis_amount, request.tax.rate)
        } else {
            Decimal::ZERO
        };

        let totals = build_totals(pools, outcome.total_discount, tax_amount, &request.rounding);
        let comparison = SavingsComparison::from_totals(&totals);

        Ok(InvoiceTotals {
            invoice_id: request.invoice_id.clone(),
            line_items,
            discounts_applied: outcome.applied,
            totals,
            comparison,
        })
    }
}
