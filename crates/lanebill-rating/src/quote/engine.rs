//! Lane-based quote pricing engine

use lanebill_common::{
    BenchmarkRate, Lane, QuoteLineItem, QuoteRequest, QuoteResponse, QuoteTaxBasis, RateCatalog,
    Result, SavingsComparison, ServiceCategory, ServiceType, UnitType, VasCatalog,
};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::discounts::{apply_discounts, PoolLine};
use crate::resolver::RateResolver;
use crate::subtotals::{quote_subtotals, PoolTotals};
use crate::tax::{build_totals, compute_tax};

/// Service code for receiving pallet lines
const RECEIVING_PALLETS_CODE: &str = "RCV-PLT";
/// Service code for receiving carton lines
const RECEIVING_CARTONS_CODE: &str = "RCV-CTN";
/// Service code for fulfillment order lines
const FULFILLMENT_ORDERS_CODE: &str = "FUL-ORD";
/// Service code for storage square-footage lines
const STORAGE_SQFT_CODE: &str = "STO-SQFT";

/// Lane-based quote pricing engine
///
/// Holds immutable catalog snapshots for the duration of a pricing
/// pass and never mutates them. The benchmark catalog is expected to be
/// pre-filtered for effective dates.
pub struct QuoteEngine<'a> {
    /// Benchmark rates
    rates: &'a RateCatalog,
    /// Value-added service rates
    vas: &'a VasCatalog,
}

impl<'a> QuoteEngine<'a> {
    /// Create an engine over catalog snapshots
    pub fn new(rates: &'a RateCatalog, vas: &'a VasCatalog) -> Self {
        Self { rates, vas }
    }

    /// Price a quote request end to end
    #[instrument(skip(self, request), fields(quote_id = %request.quote_id))]
    pub fn price(&self, request: &QuoteRequest) -> Result<QuoteResponse> {
        request.validate()?;

        let lane = Lane::new(request.origin.clone(), request.destination.clone());
        let line_items = self.assemble_lines(request);
        debug!(lines = line_items.len(), %lane, "assembled quote lines");

        let subtotals = quote_subtotals(&line_items);
        let pool_lines: Vec<PoolLine> = line_items
            .iter()
            .map(|line| PoolLine {
                line_id: None,
                category: line.category,
                amount: line.extended_cost,
                discountable: true,
            })
            .collect();
        let outcome = apply_discounts(&pool_lines, &request.discounts)?;

        let pools = PoolTotals {
            discountable: subtotals.total_discountable,
            non_discountable: subtotals.total_non_discountable,
        };
        let tax_amount = if request.tax.enabled {
            let basis_amount = match request.tax.basis {
                QuoteTaxBasis::Subtotal => pools.subtotal_before_discounts(),
                QuoteTaxBasis::DiscountedSubtotal => {
                    pools.subtotal_before_discounts() - outcome.total_discount
                }
            };
            compute_tax(basis_amount, request.tax.rate)
        } else {
            Decimal::ZERO
        };

        let totals = build_totals(pools, outcome.total_discount, tax_amount, &request.rounding);
        let comparison = SavingsComparison::from_totals(&totals);

        Ok(QuoteResponse {
            quote_id: request.quote_id.clone(),
            version: request.version,
            customer_id: request.customer_id.clone(),
            lane: lane.description(),
            line_items,
            subtotals,
            discounts_applied: outcome.applied,
            totals,
            comparison,
        })
    }

    /// Assemble priced lines in a fixed order: receiving pallets,
    /// receiving cartons, fulfillment orders, storage, then VAS lines
    /// in request order. An unpriceable or zero-quantity service
    /// produces no line.
    fn assemble_lines(&self, request: &QuoteRequest) -> Vec<QuoteLineItem> {
        let mut lines = Vec::new();

        if let Some(receiving) = &request.services.receiving {
            if receiving.pallets > Decimal::ZERO {
                match self.find_rate(ServiceType::Receiving, UnitType::Pallet, request) {
                    Some(rate) => lines.push(QuoteLineItem::new(
                        ServiceType::Receiving.category(),
                        RECEIVING_PALLETS_CODE,
                        "Receiving - Pallets",
                        receiving.pallets,
                        rate.base_rate,
                    )),
                    None => {
                        debug!(code = RECEIVING_PALLETS_CODE, "no rate matched; line skipped")
                    }
                }
            }
            if receiving.cartons > Decimal::ZERO {
                match self.carton_rate(request) {
                    Some(unit_rate) => lines.push(QuoteLineItem::new(
                        ServiceType::Receiving.category(),
                        RECEIVING_CARTONS_CODE,
                        "Receiving - Cartons",
                        receiving.cartons,
                        unit_rate,
                    )),
                    None => {
                        debug!(code = RECEIVING_CARTONS_CODE, "no rate matched; line skipped")
                    }
                }
            }
        }

        if let Some(fulfillment) = &request.services.fulfillment {
            if fulfillment.orders > Decimal::ZERO {
                match self.find_rate(ServiceType::Fulfillment, UnitType::Order, request) {
                    Some(rate) => lines.push(QuoteLineItem::new(
                        ServiceType::Fulfillment.category(),
                        FULFILLMENT_ORDERS_CODE,
                        "Fulfillment - Orders",
                        fulfillment.orders,
                        rate.base_rate,
                    )),
                    None => {
                        debug!(code = FULFILLMENT_ORDERS_CODE, "no rate matched; line skipped")
                    }
                }
            }
        }

        if let Some(storage) = &request.services.storage {
            if storage.sq_ft > Decimal::ZERO {
                match self.find_rate(ServiceType::Storage, UnitType::SqFt, request) {
                    Some(rate) => lines.push(QuoteLineItem::new(
                        ServiceType::Storage.category(),
                        STORAGE_SQFT_CODE,
                        "Storage - Sq Ft",
                        storage.sq_ft,
                        rate.base_rate,
                    )),
                    None => debug!(code = STORAGE_SQFT_CODE, "no rate matched; line skipped"),
                }
            }
        }

        for vas_request in &request.services.vas {
            if vas_request.quantity <= Decimal::ZERO {
                continue;
            }
            match self.vas.get(&vas_request.service_code) {
                Some(rate) => lines.push(QuoteLineItem::new(
                    ServiceCategory::Vas,
                    vas_request.service_code.clone(),
                    rate.description.clone(),
                    vas_request.quantity,
                    rate.base_rate,
                )),
                None => {
                    debug!(code = %vas_request.service_code, "vas code not in catalog; line skipped")
                }
            }
        }

        lines
    }

    /// Direct carton rate, or 10% of the pallet rate when the book has
    /// no carton entry for the lane
    fn carton_rate(&self, request: &QuoteRequest) -> Option<Decimal> {
        if let Some(rate) = self.find_rate(ServiceType::Receiving, UnitType::Carton, request) {
            return Some(rate.base_rate);
        }
        self.find_rate(ServiceType::Receiving, UnitType::Pallet, request)
            .map(|pallet| {
                debug!("synthesizing carton rate from pallet rate");
                pallet.base_rate * Decimal::new(10, 2)
            })
    }

    fn find_rate(
        &self,
        service_type: ServiceType,
        unit_type: UnitType,
        request: &QuoteRequest,
    ) -> Option<&'a BenchmarkRate> {
        RateResolver::find_best_rate(
            self.rates,
            service_type,
            unit_type,
            &request.origin,
            &request.destination,
        )
    }
}
