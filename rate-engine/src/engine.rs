//! Shipment rating engine
//!
//! Prices a shipment from the rate card in a fixed pipeline:
//!
//! 1. **Validation**: weight, service, weight cap, COD availability
//! 2. **Weighing**: volumetric weight, billable weight, oversize flag
//! 3. **Base amount**: billable weight × rate × category × distance
//! 4. **Discount**: weight-slab discount, then the minimum-charge floor
//! 5. **Additional charges**: fuel, COD, remote area, oversize, fragile,
//!    per-option fees, insurance
//! 6. **Totals**: subtotal, GST, rounded payable total
//! 7. **Delivery estimate**: transit upper bound with weekend roll-over
//!
//! Amounts accumulate unrounded; rounding to whole rupees happens once,
//! when the breakdown is materialized for display.

use chrono::{NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{RateConfig, ServiceRate};
use crate::delivery::project_delivery_date;
use crate::pincode::{classify_distance, PinPrefix};
use crate::slab::find_slab;
use crate::types::{
    Currency, Package, PackageCategory, PaymentInfo, RateBreakdown, RateDetails,
    ServiceAvailability, ServiceType, ShipmentQuote, ShipmentQuoteRequest, WeightDetails,
};
use crate::{Error, Result};

/// Rating engine
///
/// Holds the immutable rate card; one instance serves any number of
/// concurrent callers. Quoting is a pure function of the request, the
/// card, and the reference date.
#[derive(Debug, Clone)]
pub struct RateEngine {
    config: RateConfig,
}

impl RateEngine {
    /// Create a new engine over a validated rate card
    pub fn new(config: RateConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The rate card in use
    pub fn config(&self) -> &RateConfig {
        &self.config
    }

    /// Price a shipment, projecting delivery from today's date
    pub fn quote(&self, request: &ShipmentQuoteRequest) -> Result<ShipmentQuote> {
        self.quote_on(request, Utc::now().date_naive())
    }

    /// Price a shipment against an explicit reference date
    pub fn quote_on(
        &self,
        request: &ShipmentQuoteRequest,
        today: NaiveDate,
    ) -> Result<ShipmentQuote> {
        let service = self.validate_request(request)?;

        let (weight, oversized) = weigh(&request.package);
        let billable = Decimal::try_from(weight.billable_kg).map_err(|_| Error::InvalidWeight)?;

        let pickup = parse_pincode(request.pickup_pincode.as_deref());
        let delivery = parse_pincode(request.delivery_pincode.as_deref());
        let distance_class = classify_distance(pickup, delivery, &self.config.pincodes);

        let category_multiplier = self.category_multiplier(request.package.category);
        let distance_multiplier = self
            .config
            .distance_multipliers
            .get(&distance_class)
            .copied()
            .unwrap_or(Decimal::ONE);

        // Steps 3-6: weight charge
        let gross = billable * service.base_rate_per_kg * category_multiplier * distance_multiplier;
        let discount = find_slab(&self.config.weight_slabs, billable)
            .map(|slab| gross * slab.fraction)
            .unwrap_or(Decimal::ZERO);
        let base_amount = (gross - discount).max(service.min_charge);

        // Step 7: additional charges
        let charges = &self.config.charges;
        let fuel_surcharge = base_amount * charges.fuel_surcharge_fraction;

        let cod_charges = (request.options.cod_amount > Decimal::ZERO)
            .then(|| {
                (request.options.cod_amount * charges.cod_fraction)
                    .clamp(charges.cod_min_charge, charges.cod_max_charge)
            })
            .filter(|fee| *fee > Decimal::ZERO);

        let remote_endpoint = [pickup, delivery]
            .into_iter()
            .flatten()
            .any(|prefix| self.config.pincodes.is_remote(prefix));
        let remote_area_charges = charge_if(remote_endpoint, charges.remote_area_fee);
        let oversize_charges = charge_if(oversized, charges.oversize_fee);
        let fragile_handling = charge_if(
            request.package.category == PackageCategory::Fragile,
            charges.fragile_fee,
        );
        let door_delivery = charge_if(request.options.door_delivery, charges.door_delivery_fee);
        let signature_required =
            charge_if(request.options.signature_required, charges.signature_fee);
        let scheduled_delivery = charge_if(
            request.options.scheduled_delivery,
            charges.scheduled_delivery_fee,
        );
        let weekend_delivery = charge_if(
            request.options.weekend_delivery,
            charges.weekend_delivery_fee,
        );

        let insurance = if request.package.declared_value > Decimal::ZERO {
            find_slab(&self.config.insurance_slabs, request.package.declared_value)
                .map(|slab| request.package.declared_value * slab.fraction)
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        let additional_charges = fuel_surcharge
            + insurance
            + [
                cod_charges,
                remote_area_charges,
                oversize_charges,
                fragile_handling,
                door_delivery,
                signature_required,
                scheduled_delivery,
                weekend_delivery,
            ]
            .into_iter()
            .flatten()
            .sum::<Decimal>();

        // Steps 8-10: totals
        let subtotal = base_amount + additional_charges;
        let gst = subtotal * charges.gst_fraction;
        let total = round_rupees(subtotal + gst);

        // Step 11: delivery estimate
        let estimated_delivery_date = project_delivery_date(
            today,
            service.transit_days,
            request.options.weekend_delivery,
        );

        tracing::debug!(
            "Quoted {} shipment: {} INR ({:.2}kg billable, {} lane)",
            request.service,
            total,
            weight.billable_kg,
            distance_class
        );

        let amount_in_smallest_unit = (total * Currency::INR.smallest_unit_factor())
            .to_i64()
            .unwrap_or(0);

        Ok(ShipmentQuote {
            rate_details: RateDetails {
                service_type: request.service,
                transit_days: service.transit_days,
                estimated_delivery_date,
                weight,
            },
            breakdown: RateBreakdown {
                base_amount: round_rupees(base_amount),
                rate_per_kg: service.base_rate_per_kg,
                category_multiplier,
                distance_multiplier,
                discount: round_rupees(discount),
                fuel_surcharge: round_rupees(fuel_surcharge),
                cod_charges: cod_charges.map(round_rupees),
                remote_area_charges: remote_area_charges.map(round_rupees),
                oversize_charges: oversize_charges.map(round_rupees),
                fragile_handling: fragile_handling.map(round_rupees),
                door_delivery: door_delivery.map(round_rupees),
                signature_required: signature_required.map(round_rupees),
                scheduled_delivery: scheduled_delivery.map(round_rupees),
                weekend_delivery: weekend_delivery.map(round_rupees),
                insurance: round_rupees(insurance),
                subtotal: round_rupees(subtotal),
                gst: round_rupees(gst),
                total,
            },
            payment_info: PaymentInfo {
                amount_in_smallest_unit,
                currency_code: Currency::INR,
                cod_amount: request.options.cod_amount,
                description: format!(
                    "{} shipment, {:.2}kg billable",
                    request.service, weight.billable_kg
                ),
            },
        })
    }

    /// Check whether a service can be booked for a lane
    ///
    /// The service name arrives as raw form input; an unrecognized or
    /// unconfigured name reports unavailability rather than an error.
    /// Only same-day delivery is constrained: both endpoints must share
    /// a PIN prefix and the delivery area must not be remote. Carrier
    /// capacity is not modeled.
    pub fn check_service_availability(
        &self,
        pickup_pincode: Option<&str>,
        delivery_pincode: Option<&str>,
        service: &str,
    ) -> ServiceAvailability {
        let service_type = match ServiceType::from_str(service) {
            Some(service_type) if self.config.services.contains_key(&service_type) => service_type,
            _ => return ServiceAvailability::unavailable("Invalid service type"),
        };

        if service_type != ServiceType::SameDay {
            return ServiceAvailability::available();
        }

        let pickup = pickup_pincode.and_then(PinPrefix::parse);
        let delivery = delivery_pincode.and_then(PinPrefix::parse);
        let (pickup, delivery) = match (pickup, delivery) {
            (Some(pickup), Some(delivery)) => (pickup, delivery),
            _ => {
                return ServiceAvailability::unavailable(
                    "Pickup and delivery pincodes required for same day delivery",
                )
            }
        };

        if pickup != delivery {
            return ServiceAvailability::unavailable(
                "Same day delivery only available within same city",
            );
        }
        if self.config.pincodes.is_remote(delivery) {
            return ServiceAvailability::unavailable(
                "Same day delivery not available in remote areas",
            );
        }

        ServiceAvailability::available()
    }

    /// Fail-fast validation pass; runs before any monetary computation
    fn validate_request(&self, request: &ShipmentQuoteRequest) -> Result<&ServiceRate> {
        let weight_kg = request.package.weight_kg;
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(Error::InvalidWeight);
        }

        let service = self
            .config
            .services
            .get(&request.service)
            .ok_or_else(|| Error::UnknownServiceType {
                service: request.service.to_string(),
            })?;

        if weight_kg > service.max_weight_kg {
            return Err(Error::WeightExceedsServiceLimit {
                weight_kg,
                max_weight_kg: service.max_weight_kg,
                service: request.service.to_string(),
            });
        }

        if request.options.cod_amount > Decimal::ZERO && !service.cod_available {
            return Err(Error::CodNotAvailableForService {
                service: request.service.to_string(),
            });
        }

        Ok(service)
    }

    fn category_multiplier(&self, category: PackageCategory) -> Decimal {
        match self.config.category_multipliers.get(&category) {
            Some(multiplier) => *multiplier,
            None => {
                tracing::warn!("No multiplier configured for {}, using 1.0", category);
                Decimal::ONE
            }
        }
    }
}

/// Weight facts and the oversize flag for a package
fn weigh(package: &Package) -> (WeightDetails, bool) {
    let (volumetric_kg, oversized) = match &package.dimensions {
        Some(dims) if dims.is_valid() => (dims.volumetric_weight_kg(), dims.is_oversized()),
        _ => (0.0, false),
    };

    let details = WeightDetails {
        actual_kg: package.weight_kg,
        volumetric_kg,
        billable_kg: package.weight_kg.max(volumetric_kg),
    };
    (details, oversized)
}

fn parse_pincode(pincode: Option<&str>) -> Option<PinPrefix> {
    let raw = pincode?;
    let prefix = PinPrefix::parse(raw);
    if prefix.is_none() {
        tracing::warn!("Unparseable pincode {:?}, falling back to national rate", raw);
    }
    prefix
}

fn charge_if(applies: bool, fee: Decimal) -> Option<Decimal> {
    (applies && fee > Decimal::ZERO).then_some(fee)
}

/// Round to whole rupees, half away from zero
fn round_rupees(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
