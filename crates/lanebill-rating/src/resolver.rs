//! Lane-specificity benchmark rate resolution

use lanebill_common::{BenchmarkRate, GeoRef, RateCatalog, ServiceType, UnitType};
use tracing::debug;

/// Picks the most lane-specific benchmark rate for a request
///
/// Matching runs in strict specificity order: zip3, then state, then
/// country. The first tier with a match wins; within a tier the first
/// catalog entry wins. Tiers are never scored or merged.
///
/// The resolver does not consult effective dates. Callers narrow the
/// catalog with `RateCatalog::effective_on` before resolving.
pub struct RateResolver;

impl RateResolver {
    /// Find the best rate for a service/unit pair on a lane
    pub fn find_best_rate<'a>(
        catalog: &'a RateCatalog,
        service_type: ServiceType,
        unit_type: UnitType,
        origin: &GeoRef,
        destination: &GeoRef,
    ) -> Option<&'a BenchmarkRate> {
        let matches_service =
            |r: &&BenchmarkRate| r.service_type == service_type && r.unit_type == unit_type;

        if let Some(rate) = catalog
            .rates
            .iter()
            .filter(matches_service)
            .find(|r| Self::zip3_match(r, origin, destination))
        {
            debug!(%origin, %destination, ?service_type, ?unit_type, "matched zip3-level rate");
            return Some(rate);
        }
        if let Some(rate) = catalog
            .rates
            .iter()
            .filter(matches_service)
            .find(|r| Self::state_match(r, origin, destination))
        {
            debug!(%origin, %destination, ?service_type, ?unit_type, "matched state-level rate");
            return Some(rate);
        }
        if let Some(rate) = catalog
            .rates
            .iter()
            .filter(matches_service)
            .find(|r| Self::country_match(r, origin, destination))
        {
            debug!(%origin, %destination, ?service_type, ?unit_type, "matched country-level rate");
            return Some(rate);
        }

        debug!(%origin, %destination, ?service_type, ?unit_type, "no benchmark rate matched");
        None
    }

    /// Both endpoints pinned to the request's zip3 prefixes
    fn zip3_match(rate: &BenchmarkRate, origin: &GeoRef, destination: &GeoRef) -> bool {
        rate.origin.zip3.is_some()
            && rate.origin.zip3 == origin.zip3
            && rate.destination.zip3.is_some()
            && rate.destination.zip3 == destination.zip3
    }

    /// Both endpoints pinned to the request's states, on a rate that
    /// carries no zip3 scope (a zip-scoped rate never doubles as a
    /// state-level rule)
    fn state_match(rate: &BenchmarkRate, origin: &GeoRef, destination: &GeoRef) -> bool {
        rate.origin.state.is_some()
            && rate.origin.state == origin.state
            && rate.destination.state.is_some()
            && rate.destination.state == destination.state
            && !rate.has_zip3_scope()
    }

    /// Country-wide rate with no narrower scope on either endpoint
    fn country_match(rate: &BenchmarkRate, origin: &GeoRef, destination: &GeoRef) -> bool {
        rate.origin.country == origin.country
            && rate.destination.country == destination.country
            && !rate.has_zip3_scope()
            && !rate.has_state_scope()
    }
}
