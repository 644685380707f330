//! Property-based tests for rating invariants
//!
//! These tests use proptest to verify critical invariants:
//! - Determinism: same request + same date → identical quote
//! - Monotonicity: insurance never shrinks as declared value grows;
//!   the pre-discount weight charge never shrinks as weight grows
//! - Floor: the discounted base never drops below the service minimum
//! - Coverage: slab tables match every positive value exactly once
//! - Totals: the GST-inclusive total is never less than the subtotal

use chrono::NaiveDate;
use proptest::prelude::*;
use rate_engine::{
    slab, DeliveryOptions, Package, PackageCategory, RateConfig, RateEngine, ServiceType,
    ShipmentQuoteRequest,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

fn engine() -> RateEngine {
    RateEngine::new(RateConfig::default()).unwrap()
}

/// Fixed reference date (a Monday) keeps quotes reproducible
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

/// Strategy for weights in hundredths of a kilogram, within every
/// service's cap
fn weight_strategy() -> impl Strategy<Value = f64> {
    (1u32..=1000).prop_map(|hundredths| f64::from(hundredths) / 100.0)
}

/// Strategy for service types
fn service_strategy() -> impl Strategy<Value = ServiceType> {
    prop_oneof![
        Just(ServiceType::Standard),
        Just(ServiceType::Express),
        Just(ServiceType::SameDay),
        Just(ServiceType::Overnight),
    ]
}

/// Strategy for package categories
fn category_strategy() -> impl Strategy<Value = PackageCategory> {
    prop_oneof![
        Just(PackageCategory::Documents),
        Just(PackageCategory::Books),
        Just(PackageCategory::Clothing),
        Just(PackageCategory::Medicine),
        Just(PackageCategory::Electronics),
        Just(PackageCategory::Perishable),
        Just(PackageCategory::Fragile),
        Just(PackageCategory::Others),
    ]
}

/// Strategy for PIN codes drawn from every classification bucket
fn pincode_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("110001".to_string())), // metro (Delhi)
        Just(Some("400076".to_string())), // metro (Mumbai)
        Just(Some("781005".to_string())), // northeast
        Just(Some("171001".to_string())), // hill station
        Just(Some("744101".to_string())), // remote
        Just(Some("226010".to_string())), // plain
        Just(Some("122018".to_string())), // plain, same region as 124xxx
    ]
}

/// Strategy for requests that pass validation
fn request_strategy() -> impl Strategy<Value = ShipmentQuoteRequest> {
    (
        (weight_strategy(), service_strategy(), category_strategy()),
        (pincode_strategy(), pincode_strategy()),
        (0u32..=50_000, 0u32..=200_000),
        any::<[bool; 4]>(),
    )
        .prop_map(
            |(
                (weight_kg, service, category),
                (pickup_pincode, delivery_pincode),
                (cod, declared_value),
                [door, signature, scheduled, weekend],
            )| {
                // COD only where the service permits it
                let cod_amount = if service == ServiceType::SameDay {
                    Decimal::ZERO
                } else {
                    Decimal::from(cod)
                };

                ShipmentQuoteRequest {
                    package: Package {
                        weight_kg,
                        category,
                        declared_value: Decimal::from(declared_value),
                        dimensions: None,
                    },
                    service,
                    pickup_pincode,
                    delivery_pincode,
                    options: DeliveryOptions {
                        cod_amount,
                        door_delivery: door,
                        signature_required: signature,
                        scheduled_delivery: scheduled,
                        weekend_delivery: weekend,
                    },
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: quoting is deterministic for a fixed reference date
    #[test]
    fn prop_deterministic_quotes(request in request_strategy()) {
        let engine = engine();

        let first = engine.quote_on(&request, today()).unwrap();
        let second = engine.quote_on(&request, today()).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    /// Property: insurance never shrinks as declared value grows
    #[test]
    fn prop_insurance_monotone(a in 0u32..=200_000, b in 0u32..=200_000) {
        let engine = engine();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let mut request = ShipmentQuoteRequest {
            package: Package::new(3.0),
            service: ServiceType::Standard,
            pickup_pincode: None,
            delivery_pincode: None,
            options: DeliveryOptions::default(),
        };

        request.package.declared_value = Decimal::from(lo);
        let low = engine.quote_on(&request, today()).unwrap();

        request.package.declared_value = Decimal::from(hi);
        let high = engine.quote_on(&request, today()).unwrap();

        prop_assert!(high.breakdown.insurance >= low.breakdown.insurance);
    }

    /// Property: the pre-discount weight charge never shrinks as weight
    /// grows (reconstructed from the quoted rate and multipliers, which
    /// are reported unrounded)
    #[test]
    fn prop_base_monotone_in_weight(
        a in 200u32..=1000,
        b in 200u32..=1000,
        service in service_strategy(),
        category in category_strategy(),
    ) {
        let engine = engine();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let quote_for = |hundredths: u32| {
            let request = ShipmentQuoteRequest {
                package: Package {
                    weight_kg: f64::from(hundredths) / 100.0,
                    category,
                    declared_value: Decimal::ZERO,
                    dimensions: None,
                },
                service,
                pickup_pincode: None,
                delivery_pincode: None,
                options: DeliveryOptions::default(),
            };
            engine.quote_on(&request, today()).unwrap()
        };

        let low = quote_for(lo);
        let high = quote_for(hi);

        let pre_discount = |quote: &rate_engine::ShipmentQuote, hundredths: u32| {
            Decimal::new(i64::from(hundredths), 2)
                * quote.breakdown.rate_per_kg
                * quote.breakdown.category_multiplier
                * quote.breakdown.distance_multiplier
        };

        prop_assert!(
            high.rate_details.weight.billable_kg >= low.rate_details.weight.billable_kg
        );
        prop_assert!(pre_discount(&high, hi) >= pre_discount(&low, lo));
    }

    /// Property: the discounted base never drops below the service
    /// minimum charge
    #[test]
    fn prop_minimum_charge_floor(request in request_strategy()) {
        let engine = engine();
        let min_charge = engine.config().services[&request.service].min_charge;

        let quote = engine.quote_on(&request, today()).unwrap();
        prop_assert!(quote.breakdown.base_amount >= min_charge);
    }

    /// Property: every positive value lands in exactly one slab
    #[test]
    fn prop_slab_tables_cover_every_value(hundredths in 1u64..=10_000_000) {
        let config = RateConfig::default();
        let value = Decimal::new(hundredths as i64, 2);

        for slabs in [&config.weight_slabs, &config.insurance_slabs] {
            let matches = slabs.iter().filter(|slab| slab.contains(value)).count();
            prop_assert_eq!(matches, 1);
            prop_assert!(slab::find_slab(slabs, value).is_some());
        }
    }

    /// Property: the GST-inclusive total is never less than the subtotal,
    /// and the gateway amount is the rounded total in paise
    #[test]
    fn prop_total_and_paise(request in request_strategy()) {
        let quote = engine().quote_on(&request, today()).unwrap();

        prop_assert!(quote.breakdown.total >= quote.breakdown.subtotal);
        prop_assert_eq!(
            quote.payment_info.amount_in_smallest_unit,
            (quote.breakdown.total * Decimal::ONE_HUNDRED).to_i64().unwrap()
        );
    }

    /// Property: same-day service is available wherever both endpoints
    /// share a non-remote prefix
    #[test]
    fn prop_same_day_within_city(prefix in prop_oneof![Just("110"), Just("400"), Just("226")]) {
        let engine = engine();
        let pickup = format!("{prefix}001");
        let delivery = format!("{prefix}092");

        let availability = engine.check_service_availability(
            Some(&pickup),
            Some(&delivery),
            "SameDay",
        );
        prop_assert!(availability.available);
    }
}
