//! Quote request and response payloads

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::types::discount::{Discount, DiscountApplication};
use crate::types::geo::GeoRef;
use crate::types::line_item::QuoteLineItem;
use crate::types::money::RoundingPolicy;
use crate::types::totals::{SavingsComparison, Totals};

/// Requested volumes for one quote, one field per service dimension
///
/// A zero or absent quantity means "not requested" and produces no line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceVolumes {
    /// Inbound receiving volumes
    pub receiving: Option<ReceivingVolumes>,
    /// Outbound fulfillment volumes
    pub fulfillment: Option<FulfillmentVolumes>,
    /// Storage occupancy
    pub storage: Option<StorageVolumes>,
    /// Value-added services, priced in request order
    #[serde(default)]
    pub vas: Vec<VasLineRequest>,
}

/// Inbound receiving volumes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceivingVolumes {
    #[serde(default)]
    pub pallets: Decimal,
    #[serde(default)]
    pub cartons: Decimal,
}

/// Outbound fulfillment volumes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FulfillmentVolumes {
    #[serde(default)]
    pub orders: Decimal,
}

/// Storage occupancy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageVolumes {
    #[serde(default)]
    pub sq_ft: Decimal,
}

/// One requested value-added service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VasLineRequest {
    /// Catalog code to price against
    pub service_code: String,
    /// Billed units
    pub quantity: Decimal,
}

/// Basis the quote path computes tax on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteTaxBasis {
    /// Before-discount subtotal
    #[default]
    Subtotal,
    /// Subtotal net of applied discounts
    DiscountedSubtotal,
}

/// Tax configuration on a quote request
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteTax {
    /// Whether tax is computed at all
    #[serde(default)]
    pub enabled: bool,
    /// Percent rate
    #[serde(default)]
    pub rate: Decimal,
    /// Amount the rate applies to
    #[serde(default)]
    pub basis: QuoteTaxBasis,
}

impl QuoteTax {
    /// Tax at `rate` percent on the given basis
    pub fn at_rate(rate: Decimal, basis: QuoteTaxBasis) -> Self {
        Self {
            enabled: true,
            rate,
            basis,
        }
    }
}

/// A quote pricing request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Caller-assigned quote identifier, echoed in the response
    pub quote_id: String,
    /// Quote revision number, echoed in the response
    #[serde(default = "default_version")]
    pub version: u32,
    /// Customer the quote is for, echoed in the response
    pub customer_id: String,
    /// Lane origin
    pub origin: GeoRef,
    /// Lane destination
    pub destination: GeoRef,
    /// Requested service volumes
    #[serde(default)]
    pub services: ServiceVolumes,
    /// Discounts in negotiation order
    #[serde(default)]
    pub discounts: Vec<Discount>,
    /// Tax configuration
    #[serde(default)]
    pub tax: QuoteTax,
    /// Grand-total rounding policy
    #[serde(default)]
    pub rounding: RoundingPolicy,
}

fn default_version() -> u32 {
    1
}

impl QuoteRequest {
    /// Create a request with no volumes, discounts, or tax
    pub fn new(
        quote_id: impl Into<String>,
        customer_id: impl Into<String>,
        origin: GeoRef,
        destination: GeoRef,
    ) -> Self {
        Self {
            quote_id: quote_id.into(),
            version: 1,
            customer_id: customer_id.into(),
            origin,
            destination,
            services: ServiceVolumes::default(),
            discounts: Vec::new(),
            tax: QuoteTax::default(),
            rounding: RoundingPolicy::default(),
        }
    }

    /// Set the quote revision
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Set the requested volumes
    pub fn with_services(mut self, services: ServiceVolumes) -> Self {
        self.services = services;
        self
    }

    /// Append a discount
    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discounts.push(discount);
        self
    }

    /// Set the tax configuration
    pub fn with_tax(mut self, tax: QuoteTax) -> Self {
        self.tax = tax;
        self
    }

    /// Set the grand-total rounding policy
    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    /// Check identifiers and quantity signs before pricing
    pub fn validate(&self) -> Result<()> {
        if self.quote_id.is_empty() {
            return Err(ValidationError::MissingIdentifier {
                field: "quote_id".to_string(),
            }
            .into());
        }
        if self.customer_id.is_empty() {
            return Err(ValidationError::MissingIdentifier {
                field: "customer_id".to_string(),
            }
            .into());
        }
        if let Some(receiving) = &self.services.receiving {
            check_non_negative("receiving.pallets", receiving.pallets)?;
            check_non_negative("receiving.cartons", receiving.cartons)?;
        }
        if let Some(fulfillment) = &self.services.fulfillment {
            check_non_negative("fulfillment.orders", fulfillment.orders)?;
        }
        if let Some(storage) = &self.services.storage {
            check_non_negative("storage.sq_ft", storage.sq_ft)?;
        }
        for vas in &self.services.vas {
            check_non_negative(&vas.service_code, vas.quantity)?;
        }
        Ok(())
    }
}

fn check_non_negative(service_code: &str, quantity: Decimal) -> Result<()> {
    if quantity < Decimal::ZERO {
        return Err(ValidationError::NegativeQuantity {
            service_code: service_code.to_string(),
            quantity,
        }
        .into());
    }
    Ok(())
}

/// Per-bucket subtotals on a quote
///
/// A bucket with no contributing lines is absent, not zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteSubtotals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiving: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vas: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surcharges: Option<Decimal>,
    /// Sum over all lines open to discounts
    pub total_discountable: Decimal,
    /// Sum over all lines closed to discounts
    pub total_non_discountable: Decimal,
}

/// The priced quote returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Echoed from the request
    pub quote_id: String,
    /// Echoed from the request
    pub version: u32,
    /// Echoed from the request
    pub customer_id: String,
    /// Human-readable lane description
    pub lane: String,
    /// Priced lines in assembly order
    pub line_items: Vec<QuoteLineItem>,
    /// Per-bucket subtotals
    pub subtotals: QuoteSubtotals,
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
    use rust_decimal_macros::dec;

    fn sample_request() -> QuoteRequest {
        QuoteRequest::new(
            "Q-1001",
            "CUST-42",
            GeoRef::new("US").with_state("CA").with_zip3("902"),
            GeoRef::new("US").with_state("TX").with_zip3("750"),
        )
    }

    #[test]
    fn test_validate_accepts_sample() {
        let request = sample_request().with_services(ServiceVolumes {
            receiving: Some(ReceivingVolumes {
                pallets: dec!(100),
                cartons: dec!(0),
            }),
            ..Default::default()
        });
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_quote_id() {
        let mut request = sample_request();
        request.quote_id.clear();
        let result = request.validate();
        assert!(matches!(
            result,
            Err(LanebillError::Validation(
                ValidationError::MissingIdentifier { .. }
            ))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_vas_quantity() {
        let request = sample_request().with_services(ServiceVolumes {
            vas: vec![VasLineRequest {
                service_code: "VAS-LBL".to_string(),
                quantity: dec!(-1),
            }],
            ..Default::default()
        });
        let result = request.validate();
        assert!(matches!(
            result,
            Err(LanebillError::Validation(
                ValidationError::NegativeQuantity { .. }
            ))
        ));
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{
                "quote_id": "Q-1",
                "customer_id": "C-1",
                "origin": {"country": "US", "state": null, "zip3": null},
                "destination": {"country": "US", "state": null, "zip3": null}
            }"#,
        )
        .unwrap();
        assert_eq!(request.version, 1);
        assert!(request.discounts.is_empty());
        assert!(!request.tax.enabled);
        assert_eq!(request.rounding, RoundingPolicy::default());
    }

    #[test]
    fn test_empty_buckets_absent_in_json() {
        let subtotals = QuoteSubtotals {
            receiving: Some(dec!(2500.00)),
            total_discountable: dec!(2500.00),
            ..Default::default()
        };
        let json = serde_json::to_value(&subtotals).unwrap();
        assert!(json.get("receiving").is_some());
        assert!(json.get("fulfillment").is_none());
        assert!(json.get("surcharges").is_none());
    }
}
