//! Core data types for the Lanebill pricing core

pub mod discount;
pub mod geo;
pub mod invoice;
pub mod line_item;
pub mod money;
pub mod quote;
pub mod rate;
pub mod totals;
