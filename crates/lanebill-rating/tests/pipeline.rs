//! End-to-end pipeline tests through the public API
//!
//! Walks full quote and invoice runs: rate resolution, line assembly,
//! subtotals, discount application, tax, rounding, and response shape.

use lanebill_common::{
    BenchmarkRate, Discount, DiscountKind, DiscountScope, GeoRef, InvoiceLine, InvoiceTax,
    InvoiceTaxBasis, InvoiceTotalsRequest, QuoteRequest, RateCatalog, ReceivingVolumes,
    RoundingMode, RoundingPolicy, ServiceCategory, ServiceType, ServiceVolumes, StorageVolumes,
    UnitType, VasCatalog, VasLineRequest, VasRate,
};
use lanebill_rating::{InvoiceCalculator, QuoteEngine};
use rust_decimal_macros::dec;

fn la_origin() -> GeoRef {
    GeoRef::new("US").with_state("CA").with_zip3("902")
}

fn dallas_destination() -> GeoRef {
    GeoRef::new("US").with_state("TX").with_zip3("750")
}

fn benchmark_catalog() -> RateCatalog {
    RateCatalog::new(vec![
        // Country-level fallback for receiving pallets
        BenchmarkRate::new(
            ServiceType::Receiving,
            UnitType::Pallet,
            dec!(20.0000),
            GeoRef::new("US"),
            GeoRef::new("US"),
        ),
        // Zip3-scoped rate that should win on the LA -> Dallas lane
        BenchmarkRate::new(
            ServiceType::Receiving,
            UnitType::Pallet,
            dec!(25.0000),
            la_origin(),
            dallas_destination(),
        ),
        BenchmarkRate::new(
            ServiceType::Storage,
            UnitType::SqFt,
            dec!(1.2500),
            GeoRef::new("US").with_state("CA"),
            GeoRef::new("US").with_state("TX"),
        ),
    ])
}

fn vas_catalog() -> VasCatalog {
    VasCatalog::new().with_rate(VasRate::new("VAS-LBL", "Relabeling", dec!(0.2500)))
}

#[test]
fn quote_pipeline_resolves_discounts_and_totals() {
    let rates = benchmark_catalog();
    let vas = vas_catalog();
    let engine = QuoteEngine::new(&rates, &vas);

    let request = QuoteRequest::new("Q-1001", "CUST-42", la_origin(), dallas_destination())
        .with_services(ServiceVolumes {
            receiving: Some(ReceivingVolumes {
                pallets: dec!(100),
                cartons: dec!(0),
            }),
            ..Default::default()
        })
        .with_discount(Discount::flat(dec!(500), "Contract credit"))
        .with_discount(Discount::percentage(dec!(5), "Seasonal promotion"));

    let response = engine.price(&request).unwrap();

    // The zip3-scoped 25.00 rate wins over the country-level 20.00 rate
    assert_eq!(response.line_items.len(), 1);
    assert_eq!(response.line_items[0].unit_rate, dec!(25.0000));
    // 100 * 25.00 = 2500.00
    assert_eq!(response.line_items[0].extended_cost, dec!(2500.00));
    assert_eq!(response.subtotals.receiving, Some(dec!(2500.00)));

    // Flat 500 first, then 5% of the remaining 2000.00 = 100.00
    assert_eq!(response.discounts_applied.len(), 2);
    assert_eq!(response.discounts_applied[0].kind, DiscountKind::Flat);
    assert_eq!(response.discounts_applied[0].applied_to_amount, dec!(500));
    assert_eq!(response.discounts_applied[1].kind, DiscountKind::Percentage);
    assert_eq!(response.discounts_applied[1].applied_to_amount, dec!(100.00));

    assert_eq!(response.totals.subtotal_before_discounts, dec!(2500.00));
    assert_eq!(response.totals.total_discount, dec!(600.00));
    assert_eq!(response.totals.after_discounts, dec!(1900.00));
    assert_eq!(response.totals.tax_amount, dec!(0));
    assert_eq!(response.totals.grand_total, dec!(1900.00));

    // Savings block: 600 / 2500 * 100 = 24.00
    let comparison = response.comparison.expect("discounted quote carries savings");
    assert_eq!(comparison.savings_amount, dec!(600.00));
    assert_eq!(comparison.savings_percentage, dec!(24.00));

    assert_eq!(response.lane, "US-CA-902 -> US-TX-750");
}

#[test]
fn quote_without_discounts_omits_comparison_in_json() {
    let rates = benchmark_catalog();
    let vas = vas_catalog();
    let engine = QuoteEngine::new(&rates, &vas);

    let request = QuoteRequest::new("Q-2", "CUST-1", la_origin(), dallas_destination())
        .with_services(ServiceVolumes {
            receiving: Some(ReceivingVolumes {
                pallets: dec!(10),
                cartons: dec!(0),
            }),
            ..Default::default()
        });

    let response = engine.price(&request).unwrap();
    assert!(response.comparison.is_none());

    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("comparison").is_none());
    // Buckets with no lines are absent, not null or zero
    assert!(json["subtotals"].get("storage").is_none());
    assert!(json["subtotals"].get("vas").is_none());
    assert!(json["subtotals"].get("receiving").is_some());
}

#[test]
fn quote_pricing_is_idempotent() {
    let rates = benchmark_catalog();
    let vas = vas_catalog();
    let engine = QuoteEngine::new(&rates, &vas);

    let request = QuoteRequest::new("Q-3", "CUST-7", la_origin(), dallas_destination())
        .with_services(ServiceVolumes {
            receiving: Some(ReceivingVolumes {
                pallets: dec!(42),
                cartons: dec!(0),
            }),
            storage: Some(StorageVolumes { sq_ft: dec!(800) }),
            vas: vec![VasLineRequest {
                service_code: "VAS-LBL".to_string(),
                quantity: dec!(300),
            }],
            ..Default::default()
        })
        .with_discount(Discount::percentage(dec!(7.5), "Loyalty"));

    let first = serde_json::to_string(&engine.price(&request).unwrap()).unwrap();
    let second = serde_json::to_string(&engine.price(&request).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn quote_lines_follow_assembly_order_across_services() {
    let rates = benchmark_catalog();
    let vas = vas_catalog();
    let engine = QuoteEngine::new(&rates, &vas);

    let request = QuoteRequest::new("Q-4", "CUST-1", la_origin(), dallas_destination())
        .with_services(ServiceVolumes {
            receiving: Some(ReceivingVolumes {
                pallets: dec!(10),
                cartons: dec!(0),
            }),
            storage: Some(StorageVolumes { sq_ft: dec!(500) }),
            vas: vec![VasLineRequest {
                service_code: "VAS-LBL".to_string(),
                quantity: dec!(50),
            }],
            ..Default::default()
        });

    let response = engine.price(&request).unwrap();
    let categories: Vec<ServiceCategory> =
        response.line_items.iter().map(|l| l.category).collect();
    assert_eq!(
        categories,
        vec![
            ServiceCategory::Receiving,
            ServiceCategory::Storage,
            ServiceCategory::Vas,
        ]
    );
}

#[test]
fn expired_rates_drop_out_before_resolution() {
    use chrono::NaiveDate;

    let catalog = RateCatalog::new(vec![
        BenchmarkRate::new(
            ServiceType::Receiving,
            UnitType::Pallet,
            dec!(25.0000),
            la_origin(),
            dallas_destination(),
        )
        .with_effective_window(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        ),
        BenchmarkRate::new(
            ServiceType::Receiving,
            UnitType::Pallet,
            dec!(27.5000),
            GeoRef::new("US").with_state("CA"),
            GeoRef::new("US").with_state("TX"),
        )
        .with_effective_window(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        ),
    ]);

    // Narrowed to mid-2024, only the state-level 27.50 rate survives
    let effective = catalog.effective_on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    let vas = VasCatalog::new();
    let engine = QuoteEngine::new(&effective, &vas);

    let request = QuoteRequest::new("Q-5", "CUST-1", la_origin(), dallas_destination())
        .with_services(ServiceVolumes {
            receiving: Some(ReceivingVolumes {
                pallets: dec!(10),
                cartons: dec!(0),
            }),
            ..Default::default()
        });

    let response = engine.price(&request).unwrap();
    assert_eq!(response.line_items[0].unit_rate, dec!(27.5000));
}

#[test]
fn invoice_pipeline_pools_discounts_and_taxes() {
    let request = InvoiceTotalsRequest::new("INV-2201")
        .with_line(InvoiceLine {
            line_id: "L1".to_string(),
            category: ServiceCategory::Storage,
            service_code: "STO-SQFT".to_string(),
            description: "Storage".to_string(),
            quantity: dec!(1000),
            unit_rate: dec!(1.25),
            discountable: true,
        })
        .with_line(InvoiceLine {
            line_id: "L2".to_string(),
            category: ServiceCategory::Fulfillment,
            service_code: "FUL-ORD".to_string(),
            description: "Order fulfillment".to_string(),
            quantity: dec!(450),
            unit_rate: dec!(2.10),
            discountable: true,
        })
        .with_line(InvoiceLine {
            line_id: "L3".to_string(),
            category: ServiceCategory::Surcharge,
            service_code: "SUR-FUEL".to_string(),
            description: "Fuel surcharge".to_string(),
            quantity: dec!(1),
            unit_rate: dec!(85.00),
            discountable: false,
        })
        .with_discount(
            Discount::percentage(dec!(10), "Storage promotion")
                .with_scope(DiscountScope::Categories(vec![ServiceCategory::Storage])),
        )
        .with_discount(Discount::flat(dec!(300), "Contract credit"))
        .with_tax(InvoiceTax::at_rate(dec!(8.25), InvoiceTaxBasis::AfterDiscounts));

    let result = InvoiceCalculator::calculate(&request).unwrap();

    // Pools: discountable = 1250.00 + 945.00, non-discountable = 85.00
    assert_eq!(result.totals.subtotal_discountable, dec!(2195.00));
    assert_eq!(result.totals.subtotal_non_discountable, dec!(85.00));

    // Flat 300 lands first, then 10% of the storage line's 1250.00
    assert_eq!(result.discounts_applied[0].kind, DiscountKind::Flat);
    assert_eq!(result.discounts_applied[0].applied_to_amount, dec!(300));
    assert_eq!(result.discounts_applied[1].applied_to_amount, dec!(125.00));
    assert_eq!(result.totals.total_discount, dec!(425.00));

    // After discounts: 2280.00 - 425.00 = 1855.00
    assert_eq!(result.totals.after_discounts, dec!(1855.00));
    // Tax = 1855.00 * 8.25% = 153.0375, rounds to 153.04
    assert_eq!(result.totals.tax_amount, dec!(153.04));
    assert_eq!(result.totals.grand_total, dec!(2008.04));

    let comparison = result.comparison.expect("discounted invoice carries savings");
    // 425 / 2280 * 100 = 18.6403..., rounds to 18.64
    assert_eq!(comparison.savings_percentage, dec!(18.64));
}

#[test]
fn invoice_floor_rounding_records_adjustment() {
    let request = InvoiceTotalsRequest::new("INV-7")
        .with_line(InvoiceLine {
            line_id: "L1".to_string(),
            category: ServiceCategory::Vas,
            service_code: "VAS-KIT".to_string(),
            description: "Kitting".to_string(),
            quantity: dec!(33),
            unit_rate: dec!(1.75),
            discountable: true,
        })
        .with_tax(InvoiceTax::at_rate(dec!(8.875), InvoiceTaxBasis::Subtotal))
        .with_rounding(RoundingPolicy {
            mode: RoundingMode::Floor,
            precision: 0,
        });

    let result = InvoiceCalculator::calculate(&request).unwrap();
    // 33 * 1.75 = 57.75; tax = 57.75 * 8.875% = 5.125..., rounds to 5.13
    assert_eq!(result.totals.tax_amount, dec!(5.13));
    // 57.75 + 5.13 = 62.88, floored to 62
    assert_eq!(result.totals.grand_total, dec!(62));
    assert_eq!(result.totals.rounding_adjustment, dec!(-0.88));
}
