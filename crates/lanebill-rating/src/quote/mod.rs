//! Quote pricing module
//!
//! Prices requested service volumes against the benchmark and VAS
//! catalogs, then runs the shared discount, tax, and rounding pipeline.

pub mod engine;

pub use engine::QuoteEngine;
