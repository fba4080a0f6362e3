//! Error types for the Lanebill pricing core
//!
//! Provides a unified error type and domain-specific error variants

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using LanebillError
pub type Result<T> = std::result::Result<T, LanebillError>;

/// Unified error type for Lanebill operations
#[derive(Debug, Error)]
pub enum LanebillError {
    // Input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Request validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing identifier: {field} must not be empty")]
    MissingIdentifier { field: String },

    #[error("Negative quantity for {service_code}: {quantity}")]
    NegativeQuantity {
        service_code: String,
        quantity: Decimal,
    },

    #[error("Negative unit rate for {service_code}: {rate}")]
    NegativeUnitRate { service_code: String, rate: Decimal },

    #[error("Discount references unknown line: {line_id}")]
    UnknownLineReference { line_id: String },
}

// Implement From for common external error types
impl From<serde_json::Error> for LanebillError {
    fn from(err: serde_json::Error) -> Self {
        LanebillError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for LanebillError {
    fn from(err: anyhow::Error) -> Self {
        LanebillError::Internal(err.to_string())
    }
}
