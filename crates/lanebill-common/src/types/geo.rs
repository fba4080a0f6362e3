//! Geographic references and shipping lanes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic endpoint of a shipping lane
///
/// Specificity increases with each populated field: country only,
/// country + state, or country + state + zip3 prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeoRef {
    /// ISO country code (e.g. "US")
    pub country: String,
    /// State or province code, when known
    pub state: Option<String>,
    /// First three digits of the postal code, when known
    pub zip3: Option<String>,
}

impl GeoRef {
    /// Create a country-level reference
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            state: None,
            zip3: None,
        }
    }

    /// Set the state code
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the zip3 prefix
    pub fn with_zip3(mut self, zip3: impl Into<String>) -> Self {
        self.zip3 = Some(zip3.into());
        self
    }
}

impl fmt::Display for GeoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.country)?;
        if let Some(state) = &self.state {
            write!(f, "-{}", state)?;
        }
        if let Some(zip3) = &self.zip3 {
            write!(f, "-{}", zip3)?;
        }
        Ok(())
    }
}

/// Origin/destination pair describing a shipping lane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    /// Where freight originates
    pub origin: GeoRef,
    /// Where freight delivers
    pub destination: GeoRef,
}

impl Lane {
    /// Create a lane from two endpoints
    pub fn new(origin: GeoRef, destination: GeoRef) -> Self {
        Self {
            origin,
            destination,
        }
    }

    /// Human-readable lane description echoed in quote responses
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.origin, self.destination)
    }
}
