//! Invoice totals module
//!
//! Computes pools, discounts, tax, and rounding over already-priced
//! invoice lines.

pub mod totals;

pub use totals::InvoiceCalculator;
