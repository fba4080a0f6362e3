//! Priced line items for quotes and invoices

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::types::money::round_currency;

/// Subtotal bucket a line contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Receiving,
    Fulfillment,
    Storage,
    /// Value-added services
    Vas,
    Surcharge,
}

/// A priced service line on a quote
///
/// Immutable once assembled; the extended cost is quantized to currency
/// precision at line level and never re-rounded downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLineItem {
    /// Bucket the line rolls up into
    pub category: ServiceCategory,
    /// Catalog code for the service
    pub service_code: String,
    /// Human-readable service name
    pub description: String,
    /// Billed units
    pub quantity: Decimal,
    /// Price per unit
    pub unit_rate: Decimal,
    /// quantity x unit_rate, rounded to currency precision
    pub extended_cost: Decimal,
}

impl QuoteLineItem {
    /// Assemble a line, extending quantity by rate at currency precision
    pub fn new(
        category: ServiceCategory,
        service_code: impl Into<String>,
        description: impl Into<String>,
        quantity: Decimal,
        unit_rate: Decimal,
    ) -> Self {
        Self {
            category,
            service_code: service_code.into(),
            description: description.into(),
            quantity,
            unit_rate,
            extended_cost: round_currency(quantity * unit_rate),
        }
    }
}

/// Unpriced invoice input row, as captured by billing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Caller-assigned line identifier, referenced by discount scopes
    pub line_id: String,
    /// Bucket the line rolls up into
    pub category: ServiceCategory,
    /// Catalog code for the service
    pub service_code: String,
    /// Human-readable service name
    pub description: String,
    /// Billed units
    pub quantity: Decimal,
    /// Price per unit
    pub unit_rate: Decimal,
    /// Whether discounts may draw from this line
    pub discountable: bool,
}

impl InvoiceLine {
    /// Check quantity and rate signs before pricing
    pub fn validate(&self) -> Result<()> {
        if self.quantity < Decimal::ZERO {
            return Err(ValidationError::NegativeQuantity {
                service_code: self.service_code.clone(),
                quantity: self.quantity,
            }
            .into());
        }
        if self.unit_rate < Decimal::ZERO {
            return Err(ValidationError::NegativeUnitRate {
                service_code: self.service_code.clone(),
                rate: self.unit_rate,
            }
            .into());
        }
        Ok(())
    }

    /// Price the row into an invoice line item
    pub fn price(&self) -> InvoiceLineItem {
        InvoiceLineItem {
            line_id: self.line_id.clone(),
            category: self.category,
            service_code: self.service_code.clone(),
            description: self.description.clone(),
            quantity: self.quantity,
            unit_rate: self.unit_rate,
            extended_cost: round_currency(self.quantity * self.unit_rate),
            discountable: self.discountable,
        }
    }
}

/// A priced invoice line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    /// Caller-assigned line identifier
    pub line_id: String,
    /// Bucket the line rolls up into
    pub category: ServiceCategory,
    /// Catalog code for the service
    pub service_code: String,
    /// Human-readable service name
    pub description: String,
    /// Billed units
    pub quantity: Decimal,
    /// Price per unit
    pub unit_rate: Decimal,
    /// quantity x unit_rate, rounded to currency precision
    pub extended_cost: Decimal,
    /// Whether discounts may draw from this line
    pub discountable: bool,
}
