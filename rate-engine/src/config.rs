//! Rate card configuration
//!
//! The rate card is loaded once at process start and never mutated:
//! service tariffs, category and distance multipliers, discount and
//! insurance slab tables, the fixed fee table, and the PIN-prefix
//! geography. `Default` carries the production card; a TOML file can
//! override it wholesale.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::delivery::TransitDays;
use crate::pincode::{PinPrefix, PincodeClassification};
use crate::slab::{self, Slab};
use crate::types::{DistanceClass, PackageCategory, ServiceType};
use crate::{Error, Result};

/// Per-service tariff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRate {
    /// Rate per billable kilogram, in rupees
    pub base_rate_per_kg: Decimal,

    /// Floor for the discounted weight charge, in rupees
    pub min_charge: Decimal,

    /// Heaviest actual weight the service accepts, in kilograms
    pub max_weight_kg: f64,

    /// Transit window
    pub transit_days: TransitDays,

    /// Whether cash on delivery can be booked
    pub cod_available: bool,
}

/// Fixed fee table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeTable {
    /// Fuel surcharge as a fraction of the base amount
    pub fuel_surcharge_fraction: Decimal,

    /// GST as a fraction of the subtotal
    pub gst_fraction: Decimal,

    /// COD fee as a fraction of the collected amount
    pub cod_fraction: Decimal,

    /// COD fee floor, in rupees
    pub cod_min_charge: Decimal,

    /// COD fee ceiling, in rupees
    pub cod_max_charge: Decimal,

    /// Flat fee for oversized packages
    pub oversize_fee: Decimal,

    /// Flat fee for fragile handling
    pub fragile_fee: Decimal,

    /// Flat fee when either endpoint is in a remote area
    pub remote_area_fee: Decimal,

    /// Flat fee for door delivery
    pub door_delivery_fee: Decimal,

    /// Flat fee for signature on delivery
    pub signature_fee: Decimal,

    /// Flat fee for a scheduled delivery slot
    pub scheduled_delivery_fee: Decimal,

    /// Flat fee for weekend delivery
    pub weekend_delivery_fee: Decimal,
}

impl Default for ChargeTable {
    fn default() -> Self {
        Self {
            fuel_surcharge_fraction: Decimal::new(12, 2), // 12%
            gst_fraction: Decimal::new(18, 2),            // 18%
            cod_fraction: Decimal::new(2, 2),             // 2%
            cod_min_charge: Decimal::new(50, 0),
            cod_max_charge: Decimal::new(300, 0),
            oversize_fee: Decimal::new(150, 0),
            fragile_fee: Decimal::new(100, 0),
            remote_area_fee: Decimal::new(250, 0),
            door_delivery_fee: Decimal::new(50, 0),
            signature_fee: Decimal::new(30, 0),
            scheduled_delivery_fee: Decimal::new(75, 0),
            weekend_delivery_fee: Decimal::new(100, 0),
        }
    }
}

/// Full rate card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfig {
    /// Tariff per service tier
    pub services: HashMap<ServiceType, ServiceRate>,

    /// Rate multiplier per package category
    pub category_multipliers: HashMap<PackageCategory, Decimal>,

    /// Rate multiplier per distance class
    pub distance_multipliers: HashMap<DistanceClass, Decimal>,

    /// Weight-discount slabs over billable weight
    pub weight_slabs: Vec<Slab>,

    /// Fixed fee table
    pub charges: ChargeTable,

    /// Insurance premium slabs over declared value
    pub insurance_slabs: Vec<Slab>,

    /// PIN-prefix geography
    pub pincodes: PincodeClassification,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            services: HashMap::from([
                (
                    ServiceType::Standard,
                    ServiceRate {
                        base_rate_per_kg: Decimal::new(45, 0),
                        min_charge: Decimal::new(35, 0),
                        max_weight_kg: 50.0,
                        transit_days: TransitDays::range(4, 7),
                        cod_available: true,
                    },
                ),
                (
                    ServiceType::Express,
                    ServiceRate {
                        base_rate_per_kg: Decimal::new(80, 0),
                        min_charge: Decimal::new(60, 0),
                        max_weight_kg: 30.0,
                        transit_days: TransitDays::range(2, 3),
                        cod_available: true,
                    },
                ),
                (
                    ServiceType::Overnight,
                    ServiceRate {
                        base_rate_per_kg: Decimal::new(120, 0),
                        min_charge: Decimal::new(90, 0),
                        max_weight_kg: 20.0,
                        transit_days: TransitDays::exact(1),
                        cod_available: true,
                    },
                ),
                (
                    ServiceType::SameDay,
                    ServiceRate {
                        base_rate_per_kg: Decimal::new(150, 0),
                        min_charge: Decimal::new(120, 0),
                        max_weight_kg: 10.0,
                        transit_days: TransitDays::exact(0),
                        cod_available: false,
                    },
                ),
            ]),
            category_multipliers: HashMap::from([
                (PackageCategory::Documents, Decimal::new(8, 1)),
                (PackageCategory::Books, Decimal::new(9, 1)),
                (PackageCategory::Clothing, Decimal::ONE),
                (PackageCategory::Medicine, Decimal::new(12, 1)),
                (PackageCategory::Electronics, Decimal::new(13, 1)),
                (PackageCategory::Perishable, Decimal::new(14, 1)),
                (PackageCategory::Fragile, Decimal::new(15, 1)),
                (PackageCategory::Others, Decimal::ONE),
            ]),
            distance_multipliers: HashMap::from([
                (DistanceClass::Local, Decimal::ONE),
                (DistanceClass::Regional, Decimal::new(12, 1)),
                (DistanceClass::Metro, Decimal::new(14, 1)),
                (DistanceClass::Zonal, Decimal::new(15, 1)),
                (DistanceClass::National, Decimal::new(18, 1)),
                (DistanceClass::HillStation, Decimal::new(2, 0)),
                (DistanceClass::Northeast, Decimal::new(22, 1)),
                (DistanceClass::Remote, Decimal::new(25, 1)),
            ]),
            weight_slabs: vec![
                Slab::new(Decimal::ZERO, Decimal::new(5, 1), Decimal::ZERO),
                Slab::new(Decimal::new(5, 1), Decimal::new(2, 0), Decimal::new(5, 2)),
                Slab::new(Decimal::new(2, 0), Decimal::new(5, 0), Decimal::new(8, 2)),
                Slab::new(Decimal::new(5, 0), Decimal::new(10, 0), Decimal::new(12, 2)),
                Slab::new(Decimal::new(10, 0), Decimal::new(25, 0), Decimal::new(15, 2)),
                Slab::open_ended(Decimal::new(25, 0), Decimal::new(20, 2)),
            ],
            charges: ChargeTable::default(),
            insurance_slabs: vec![
                Slab::new(Decimal::ZERO, Decimal::new(10_000, 0), Decimal::new(2, 2)),
                Slab::new(
                    Decimal::new(10_000, 0),
                    Decimal::new(50_000, 0),
                    Decimal::new(15, 3),
                ),
                Slab::open_ended(Decimal::new(50_000, 0), Decimal::new(1, 2)),
            ],
            pincodes: PincodeClassification {
                // Delhi, Mumbai, Hyderabad, Bangalore, Chennai, Kolkata, Pune, Ahmedabad
                metro: prefixes(&[110, 400, 500, 560, 600, 700, 411, 380]),
                // Assam and the seven-sister states
                northeast: prefixes(&[781, 790, 791, 792, 793, 794, 795, 796, 797, 798, 799]),
                // Shimla, Manali, Dehradun, Nainital
                hill_station: prefixes(&[171, 175, 248, 263]),
                // Leh, Lakshadweep, Sikkim, Andaman & Nicobar
                remote: prefixes(&[194, 682, 737, 744]),
            },
        }
    }
}

fn prefixes(values: &[u16]) -> std::collections::BTreeSet<PinPrefix> {
    values.iter().copied().map(PinPrefix::new).collect()
}

impl RateConfig {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read rate card: {}", e)))?;
        let config: RateConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse rate card: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the card
    ///
    /// Rejects empty or non-positive tariffs, missing distance
    /// multipliers, reversed COD clamps, negative fees, and slab tables
    /// that do not cover `(0, ∞)` exactly.
    pub fn validate(&self) -> Result<()> {
        if self.services.is_empty() {
            return Err(Error::Config("no services configured".to_string()));
        }

        for (service, rate) in &self.services {
            if rate.base_rate_per_kg <= Decimal::ZERO {
                return Err(Error::Config(format!(
                    "{service} base rate must be positive"
                )));
            }
            if rate.min_charge < Decimal::ZERO {
                return Err(Error::Config(format!(
                    "{service} minimum charge must not be negative"
                )));
            }
            if !rate.max_weight_kg.is_finite() || rate.max_weight_kg <= 0.0 {
                return Err(Error::Config(format!(
                    "{service} weight cap must be positive"
                )));
            }
        }

        for (category, multiplier) in &self.category_multipliers {
            if *multiplier <= Decimal::ZERO {
                return Err(Error::Config(format!(
                    "{category} multiplier must be positive"
                )));
            }
        }

        for class in DistanceClass::ALL {
            match self.distance_multipliers.get(&class) {
                Some(multiplier) if *multiplier > Decimal::ZERO => {}
                Some(_) => {
                    return Err(Error::Config(format!(
                        "{class} multiplier must be positive"
                    )));
                }
                None => {
                    return Err(Error::Config(format!("{class} multiplier is missing")));
                }
            }
        }

        slab::validate_slabs("weight", &self.weight_slabs)?;
        slab::validate_slabs("insurance", &self.insurance_slabs)?;

        let charges = &self.charges;
        let fractions = [
            ("fuel surcharge", charges.fuel_surcharge_fraction),
            ("GST", charges.gst_fraction),
            ("COD", charges.cod_fraction),
        ];
        for (name, fraction) in fractions {
            if fraction < Decimal::ZERO {
                return Err(Error::Config(format!("{name} fraction must not be negative")));
            }
        }

        if charges.cod_min_charge < Decimal::ZERO || charges.cod_min_charge > charges.cod_max_charge
        {
            return Err(Error::Config("COD fee clamp is reversed".to_string()));
        }

        let fees = [
            ("oversize", charges.oversize_fee),
            ("fragile", charges.fragile_fee),
            ("remote area", charges.remote_area_fee),
            ("door delivery", charges.door_delivery_fee),
            ("signature", charges.signature_fee),
            ("scheduled delivery", charges.scheduled_delivery_fee),
            ("weekend delivery", charges.weekend_delivery_fee),
        ];
        for (name, fee) in fees {
            if fee < Decimal::ZERO {
                return Err(Error::Config(format!("{name} fee must not be negative")));
            }
        }

        Ok(())
    }
}
