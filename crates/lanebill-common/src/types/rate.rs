//! Benchmark and value-added service rate catalogs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::types::geo::GeoRef;
use crate::types::line_item::ServiceCategory;

/// Core warehouse service covered by benchmark rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// Inbound receiving and putaway
    Receiving,
    /// Outbound order fulfillment
    Fulfillment,
    /// Warehouse space occupancy
    Storage,
}

impl ServiceType {
    /// Bucket this service contributes to in quote subtotals
    pub fn category(&self) -> ServiceCategory {
        match self {
            ServiceType::Receiving => ServiceCategory::Receiving,
            ServiceType::Fulfillment => ServiceCategory::Fulfillment,
            ServiceType::Storage => ServiceCategory::Storage,
        }
    }
}

/// Billing unit a benchmark rate is quoted against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Pallet,
    Carton,
    Order,
    SqFt,
}

/// Lane-scoped benchmark rate loaded from the rate book
///
/// Rates are read-only inputs; the engines never mutate them. The base
/// rate carries four decimal places, twice currency precision, so that
/// derived per-unit rates stay exact before line extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRate {
    /// Service the rate prices
    pub service_type: ServiceType,
    /// Unit the rate is quoted per
    pub unit_type: UnitType,
    /// Price per unit, 4 decimal places
    pub base_rate: Decimal,
    /// Origin scope of the lane
    pub origin: GeoRef,
    /// Destination scope of the lane
    pub destination: GeoRef,
    /// First day the rate applies (inclusive)
    pub effective_start_date: NaiveDate,
    /// Last day the rate applies (inclusive)
    pub effective_end_date: NaiveDate,
}

impl BenchmarkRate {
    /// Create a rate effective for all dates; narrow with `with_effective_window`
    pub fn new(
        service_type: ServiceType,
        unit_type: UnitType,
        base_rate: Decimal,
        origin: GeoRef,
        destination: GeoRef,
    ) -> Self {
        Self {
            service_type,
            unit_type,
            base_rate,
            origin,
            destination,
            effective_start_date: NaiveDate::MIN,
            effective_end_date: NaiveDate::MAX,
        }
    }

    /// Set the effective date window (inclusive on both ends)
    pub fn with_effective_window(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.effective_start_date = start;
        self.effective_end_date = end;
        self
    }

    /// Whether the effective window contains the given date
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_start_date <= date && date <= self.effective_end_date
    }

    /// Whether either endpoint narrows the lane to a zip3 prefix
    pub fn has_zip3_scope(&self) -> bool {
        self.origin.zip3.is_some() || self.destination.zip3.is_some()
    }

    /// Whether either endpoint narrows the lane to a state
    pub fn has_state_scope(&self) -> bool {
        self.origin.state.is_some() || self.destination.state.is_some()
    }
}

/// Immutable snapshot of benchmark rates handed to the pricing engines
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateCatalog {
    /// Rates in rate-book order
    pub rates: Vec<BenchmarkRate>,
}

impl RateCatalog {
    /// Create a catalog from a list of rates
    pub fn new(rates: Vec<BenchmarkRate>) -> Self {
        Self { rates }
    }

    /// Number of rates in the catalog
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the catalog holds no rates
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Filter to rates whose effective window contains `date`
    ///
    /// Rate resolution itself is date-agnostic; callers narrow the catalog
    /// with this before pricing.
    pub fn effective_on(&self, date: NaiveDate) -> RateCatalog {
        let rates: Vec<BenchmarkRate> = self
            .rates
            .iter()
            .filter(|r| r.is_effective_on(date))
            .cloned()
            .collect();
        debug!(%date, retained = rates.len(), total = self.rates.len(), "narrowed rate catalog");
        RateCatalog { rates }
    }
}

/// Rate for a value-added service, keyed by service code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VasRate {
    /// Catalog code (e.g. "VAS-LBL")
    pub service_code: String,
    /// Human-readable service name
    pub description: String,
    /// Price per unit of service
    pub base_rate: Decimal,
}

impl VasRate {
    /// Create a value-added service rate
    pub fn new(
        service_code: impl Into<String>,
        description: impl Into<String>,
        base_rate: Decimal,
    ) -> Self {
        Self {
            service_code: service_code.into(),
            description: description.into(),
            base_rate,
        }
    }
}

/// Lookup table of value-added service rates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VasCatalog {
    rates: HashMap<String, VasRate>,
}

impl VasCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rate, keyed by its service code
    pub fn with_rate(mut self, rate: VasRate) -> Self {
        self.rates.insert(rate.service_code.clone(), rate);
        self
    }

    /// Look up a rate by service code
    pub fn get(&self, service_code: &str) -> Option<&VasRate> {
        self.rates.get(service_code)
    }
}
