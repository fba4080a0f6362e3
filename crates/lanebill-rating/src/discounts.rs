//! Ordered discount application over the discountable pool

use lanebill_common::{
    round_currency, Discount, DiscountApplication, DiscountKind, DiscountScope, Result,
    ServiceCategory, ValidationError,
};
use rust_decimal::Decimal;
use tracing::debug;

/// One line's contribution to the discountable pool
#[derive(Debug, Clone)]
pub struct PoolLine {
    /// Caller-assigned id, when the payload carries one
    pub line_id: Option<String>,
    /// Bucket the line belongs to
    pub category: ServiceCategory,
    /// Line amount at currency precision
    pub amount: Decimal,
    /// Whether discounts may draw from this line
    pub discountable: bool,
}

/// Discount pipeline products: the audit list and the total taken
#[derive(Debug, Clone)]
pub struct DiscountOutcome {
    /// One entry per requested discount, in application order
    pub applied: Vec<DiscountApplication>,
    /// Sum of all applied amounts
    pub total_discount: Decimal,
}

/// Apply discounts against the discountable pool
///
/// Flat discounts apply before percentage discounts; within a kind,
/// input order is preserved. Each draw is clamped so the remaining pool
/// never goes negative, and a discount arriving after the pool drained
/// is still recorded with nothing applied. Non-discountable amounts are
/// never touched.
///
/// A `lines` scope naming an id absent from `lines` is a validation
/// error; every other shortfall degrades to a smaller or zero draw.
pub fn apply_discounts(lines: &[PoolLine], discounts: &[Discount]) -> Result<DiscountOutcome> {
    for discount in discounts {
        if let DiscountScope::Lines(ids) = &discount.apply_to {
            for id in ids {
                let known = lines
                    .iter()
                    .any(|l| l.line_id.as_deref() == Some(id.as_str()));
                if !known {
                    return Err(ValidationError::UnknownLineReference {
                        line_id: id.clone(),
                    }
                    .into());
                }
            }
        }
    }

    let mut ordered: Vec<&Discount> = discounts.iter().collect();
    ordered.sort_by_key(|d| d.kind.application_rank());

    let mut remaining: Decimal = lines
        .iter()
        .filter(|l| l.discountable)
        .map(|l| l.amount)
        .sum();
    let mut applied = Vec::with_capacity(discounts.len());
    let mut total_discount = Decimal::ZERO;

    for discount in ordered {
        if remaining <= Decimal::ZERO {
            applied.push(DiscountApplication::record(discount, Decimal::ZERO));
            continue;
        }

        let effective_base = scoped_base(lines, &discount.apply_to).min(remaining);
        let draw = match discount.kind {
            DiscountKind::Flat => discount.amount.min(effective_base),
            DiscountKind::Percentage => {
                round_currency(effective_base * discount.amount / Decimal::ONE_HUNDRED)
                    .min(effective_base)
            }
        };

        applied.push(DiscountApplication::record(discount, draw));
        remaining -= draw;
        total_discount += draw;
    }

    debug!(%total_discount, applications = applied.len(), "discount pipeline complete");

    Ok(DiscountOutcome {
        applied,
        total_discount,
    })
}

/// Sum of discountable amounts the scope reaches
fn scoped_base(lines: &[PoolLine], scope: &DiscountScope) -> Decimal {
    lines
        .iter()
        .filter(|l| l.discountable)
        .filter(|l| match scope {
            DiscountScope::All => true,
            DiscountScope::Categories(categories) => categories.contains(&l.category),
            DiscountScope::Lines(ids) => l.line_id.as_ref().is_some_and(|id| ids.contains(id)),
        })
        .map(|l| l.amount)
        .sum()
}
