//! # Lanebill Rating
//!
//! Quote pricing and invoice totals for the Lanebill 3PL pricing core.
//!
//! ## Pipeline
//!
//! ```text
//! resolve rates -> assemble lines -> subtotals -> discounts -> tax -> round
//! ```
//!
//! Both engines are pure functions over catalog and request snapshots:
//! no I/O, no shared state, no clock reads. Identical inputs produce
//! byte-identical responses.

pub mod discounts;
pub mod invoice;
pub mod quote;
pub mod resolver;
pub mod subtotals;
pub mod tax;

pub use discounts::{apply_discounts, DiscountOutcome, PoolLine};
pub use invoice::InvoiceCalculator;
pub use quote::QuoteEngine;
pub use resolver::RateResolver;
pub use subtotals::PoolTotals;
