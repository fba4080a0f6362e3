//! Discount definitions and the per-discount audit record

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::line_item::ServiceCategory;

/// How a discount's amount is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Fixed currency amount
    Flat,
    /// Percent of the remaining discountable pool
    Percentage,
}

impl DiscountKind {
    /// Application order: flat commitments land before percentage promotions
    pub fn application_rank(&self) -> u8 {
        match self {
            DiscountKind::Flat => 0,
            DiscountKind::Percentage => 1,
        }
    }
}

/// Which lines a discount may draw from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountScope {
    /// Every discountable line
    #[default]
    All,
    /// Discountable lines in the named buckets
    Categories(Vec<ServiceCategory>),
    /// Discountable lines with the named line ids
    Lines(Vec<String>),
}

/// A negotiated or promotional discount on a quote or invoice
///
/// Amounts are taken as given: a percentage over 100 is not rejected, the
/// clamp against the remaining pool is the only guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    /// Flat or percentage
    pub kind: DiscountKind,
    /// Currency amount for flat, percent for percentage
    pub amount: Decimal,
    /// Shown on the quote or invoice
    pub description: String,
    /// Lines the discount draws from; defaults to all
    #[serde(default)]
    pub apply_to: DiscountScope,
}

impl Discount {
    /// Create a flat discount over all discountable lines
    pub fn flat(amount: Decimal, description: impl Into<String>) -> Self {
        Self {
            kind: DiscountKind::Flat,
            amount,
            description: description.into(),
            apply_to: DiscountScope::All,
        }
    }

    /// Create a percentage discount over all discountable lines
    pub fn percentage(amount: Decimal, description: impl Into<String>) -> Self {
        Self {
            kind: DiscountKind::Percentage,
            amount,
            description: description.into(),
            apply_to: DiscountScope::All,
        }
    }

    /// Narrow the discount to a scope
    pub fn with_scope(mut self, scope: DiscountScope) -> Self {
        self.apply_to = scope;
        self
    }
}

/// Audit record for one discount in application order
///
/// Every discount in the request appears exactly once, including those
/// that applied nothing because the pool was already drained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountApplication {
    /// Flat or percentage
    pub kind: DiscountKind,
    /// Requested amount, echoed from the discount
    pub amount: Decimal,
    /// Echoed from the discount
    pub description: String,
    /// Currency actually deducted from the pool
    pub applied_to_amount: Decimal,
}

impl DiscountApplication {
    /// Record how much of a discount actually landed
    pub fn record(discount: &Discount, applied_to_amount: Decimal) -> Self {
        Self {
            kind: discount.kind,
            amount: discount.amount,
            description: discount.description.clone(),
            applied_to_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_flat_applies_before_percentage() {
        assert!(
            DiscountKind::Flat.application_rank() < DiscountKind::Percentage.application_rank()
        );
    }

    #[test]
    fn test_scope_defaults_to_all() {
        let discount: Discount = serde_json::from_str(
            r#"{"kind": "flat", "amount": "500", "description": "Volume commitment"}"#,
        )
        .unwrap();
        assert_eq!(discount.apply_to, DiscountScope::All);
    }

    #[test]
    fn test_scope_json_shapes() {
        let all: DiscountScope = serde_json::from_str(r#""all""#).unwrap();
        assert_eq!(all, DiscountScope::All);

        let categories: DiscountScope =
            serde_json::from_str(r#"{"categories": ["storage", "vas"]}"#).unwrap();
        assert_eq!(
            categories,
            DiscountScope::Categories(vec![ServiceCategory::Storage, ServiceCategory::Vas])
        );

        let lines: DiscountScope = serde_json::from_str(r#"{"lines": ["L1", "L3"]}"#).unwrap();
        assert_eq!(
            lines,
            DiscountScope::Lines(vec!["L1".to_string(), "L3".to_string()])
        );
    }

    #[test]
    fn test_application_echoes_discount() {
        let discount = Discount::percentage(dec!(5), "Seasonal promotion");
        let application = DiscountApplication::record(&discount, dec!(100.00));
        assert_eq!(application.kind, DiscountKind::Percentage);
        assert_eq!(application.amount, dec!(5));
        assert_eq!(application.description, "Seasonal promotion");
        assert_eq!(application.applied_to_amount, dec!(100.00));
    }
}
