//! # Lanebill Common
//!
//! Shared types and errors for the Lanebill 3PL pricing core.
//!
//! ## Core Types
//!
//! - [`Lane`]/[`GeoRef`]: origin/destination geography at country, state, or
//!   zip3 granularity
//! - [`BenchmarkRate`]/[`RateCatalog`]: lane-scoped benchmark rates with
//!   effective date windows
//! - [`VasRate`]/[`VasCatalog`]: value-added service rates keyed by code
//! - [`Discount`]/[`DiscountApplication`]: discount definitions and the
//!   per-discount audit record
//! - [`QuoteRequest`]/[`QuoteResponse`]: lane-based quote pricing payloads
//! - [`InvoiceTotalsRequest`]/[`InvoiceTotals`]: invoice totals payloads over
//!   already-priced lines
//! - [`Totals`]/[`SavingsComparison`]: shared money totals and the optional
//!   savings block

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{LanebillError, Result, ValidationError};
pub use types::{
    discount::{Discount, DiscountApplication, DiscountKind, DiscountScope},
    geo::{GeoRef, Lane},
    invoice::{InvoiceTax, InvoiceTaxBasis, InvoiceTotals, InvoiceTotalsRequest},
    line_item::{InvoiceLine, InvoiceLineItem, QuoteLineItem, ServiceCategory},
    money::{round_currency, RoundingMode, RoundingPolicy},
    quote::{
        FulfillmentVolumes, QuoteRequest, QuoteResponse, QuoteSubtotals, QuoteTax, QuoteTaxBasis,
        ReceivingVolumes, ServiceVolumes, StorageVolumes, VasLineRequest,
    },
    rate::{BenchmarkRate, RateCatalog, ServiceType, UnitType, VasCatalog, VasRate},
    totals::{SavingsComparison, Totals},
};

/// Lanebill version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decimal places carried by currency amounts
pub const CURRENCY_PRECISION: u32 = 2;

/// Decimal places carried by benchmark unit rates
pub const RATE_PRECISION: u32 = 4;
