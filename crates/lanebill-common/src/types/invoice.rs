//! Invoice totals request and response payloads

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::types::discount::{Discount, DiscountApplication};
use crate::types::line_item::{InvoiceLine, InvoiceLineItem};
use crate::types::money::RoundingPolicy;
use crate::types::totals::{SavingsComparison, Totals};

/// Basis the invoice path computes tax on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceTaxBasis {
    /// Before-discount subtotal
    #[default]
    Subtotal,
    /// Subtotal net of applied discounts
    AfterDiscounts,
}

/// Tax configuration on an invoice totals request
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTax {
    /// Whether tax is computed at all
    #[serde(default)]
    pub enabled: bool,
    /// Percent rate
    #[serde(default)]
    pub rate: Decimal,
    /// Amount the rate applies to
    #[serde(default)]
    pub basis: InvoiceTaxBasis,
}

impl InvoiceTax {
    /// Tax at `rate` percent on the given basis
    pub fn at_rate(rate: Decimal, basis: InvoiceTaxBasis) -> Self {
        Self {
            enabled: true,
            rate,
            basis,
        }
    }
}

/// Request to compute totals over already-priced invoice lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotalsRequest {
    /// Caller-assigned invoice identifier, echoed in the response
    pub invoice_id: String,
    /// Captured billing rows
    pub lines: Vec<InvoiceLine>,
    /// Discounts in negotiation order
    #[serde(default)]
    pub discounts: Vec<Discount>,
    /// Tax configuration
    #[serde(default)]
    pub tax: InvoiceTax,
    /// Grand-total rounding policy
    #[serde(default)]
    pub rounding: RoundingPolicy,
}

impl InvoiceTotalsRequest {
    /// Create a request with no lines, discounts, or tax
    pub fn new(invoice_id: impl Into<String>) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            lines: Vec::new(),
            discounts: Vec::new(),
            tax: InvoiceTax::default(),
            rounding: RoundingPolicy::default(),
        }
    }

    /// Append a billing row
    pub fn with_line(mut self, line: InvoiceLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Append a discount
    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discounts.push(discount);
        self
    }

    /// Set the tax configuration
    pub fn with_tax(mut self, tax: InvoiceTax) -> Self {
        self.tax = tax;
        self
    }

    /// Set the grand-total rounding policy
    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    /// Check the identifier and every line before pricing
    pub fn validate(&self) -> Result<()> {
        if self.invoice_id.is_empty() {
            return Err(ValidationError::MissingIdentifier {
                field: "invoice_id".to_string(),
            }
            .into());
        }
        for line in &self.lines {
            line.validate()?;
        }
        Ok(())
    }
}

/// Computed invoice totals returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Echoed from the request
    pub invoice_id: String,
    /// Priced lines in request order
    pub line_items: Vec<InvoiceLineItem>,
    /// Audit list, one entry per requested discount in application order
    pub discounts_applied: Vec<DiscountApplication>,
    /// Money totals
    pub totals: Totals,
    /// Savings block, present only when a discount applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<SavingsComparison>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LanebillError;
    use crate::types::line_item::ServiceCategory;
    use rust_decimal_macros::dec;

    fn sample_line(line_id: &str, discountable: bool) -> InvoiceLine {
        InvoiceLine {
            line_id: line_id.to_string(),
            category: ServiceCategory::Storage,
            service_code: "STO-SQFT".to_string(),
            description: "Storage".to_string(),
            quantity: dec!(1000),
            unit_rate: dec!(1.25),
            discountable,
        }
    }

    #[test]
    fn test_validate_rejects_empty_invoice_id() {
        let request = InvoiceTotalsRequest::new("").with_line(sample_line("L1", true));
        let result = request.validate();
        assert!(matches!(
            result,
            Err(LanebillError::Validation(
                ValidationError::MissingIdentifier { .. }
            ))
        ));
    }

    #[test]
    fn test_validate_checks_every_line() {
        let mut bad = sample_line("L2", true);
        bad.unit_rate = dec!(-0.50);
        let request = InvoiceTotalsRequest::new("INV-9")
            .with_line(sample_line("L1", true))
            .with_line(bad);
        let result = request.validate();
        assert!(matches!(
            result,
            Err(LanebillError::Validation(
                ValidationError::NegativeUnitRate { .. }
            ))
        ));
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: InvoiceTotalsRequest = serde_json::from_str(
            r#"{
                "invoice_id": "INV-1",
                "lines": []
            }"#,
        )
        .unwrap();
        assert!(request.discounts.is_empty());
        assert!(!request.tax.enabled);
        assert_eq!(request.rounding, RoundingPolicy::default());
    }
}
