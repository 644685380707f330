//! Core types for the rating engine
//!
//! All types are plain, immutable-per-call value structures:
//! - Requests and quotes are transient, created and discarded within a
//!   single call (no identity, no ownership beyond the call stack)
//! - Exact arithmetic (Decimal) for money; physical measurements stay f64
//! - JSON field names follow the booking API (camelCase)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::delivery::TransitDays;

/// Volumetric divisor: cm³ per billable kilogram
pub const VOLUMETRIC_DIVISOR: f64 = 5000.0;

/// Any single dimension above this is an oversized package
pub const OVERSIZE_LIMIT_CM: f64 = 120.0;

/// Shipping service tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    /// Economy ground service
    Standard,
    /// Expedited service
    Express,
    /// Intra-city delivery on the booking day
    SameDay,
    /// Next-day delivery
    Overnight,
}

impl ServiceType {
    /// Service name as used by the booking API
    pub fn code(&self) -> &'static str {
        match self {
            ServiceType::Standard => "Standard",
            ServiceType::Express => "Express",
            ServiceType::SameDay => "SameDay",
            ServiceType::Overnight => "Overnight",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Standard" => Some(ServiceType::Standard),
            "Express" => Some(ServiceType::Express),
            "SameDay" => Some(ServiceType::SameDay),
            "Overnight" => Some(ServiceType::Overnight),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Package contents category
///
/// Unrecognized form input degrades to `Others` at the parse edge; the
/// rate card assigns `Others` the neutral 1.0 multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageCategory {
    /// Paper documents
    Documents,
    /// Printed books
    Books,
    /// Garments and textiles
    Clothing,
    /// Pharmaceuticals
    Medicine,
    /// Consumer electronics
    Electronics,
    /// Temperature-sensitive goods
    Perishable,
    /// Breakable goods (attracts a handling fee)
    Fragile,
    /// Everything else
    Others,
}

impl PackageCategory {
    /// Category name as used by the booking API
    pub fn code(&self) -> &'static str {
        match self {
            PackageCategory::Documents => "Documents",
            PackageCategory::Books => "Books",
            PackageCategory::Clothing => "Clothing",
            PackageCategory::Medicine => "Medicine",
            PackageCategory::Electronics => "Electronics",
            PackageCategory::Perishable => "Perishable",
            PackageCategory::Fragile => "Fragile",
            PackageCategory::Others => "Others",
        }
    }

    /// Parse from string, falling back to `Others` for unknown input
    pub fn from_str(s: &str) -> Self {
        match s {
            "Documents" => PackageCategory::Documents,
            "Books" => PackageCategory::Books,
            "Clothing" => PackageCategory::Clothing,
            "Medicine" => PackageCategory::Medicine,
            "Electronics" => PackageCategory::Electronics,
            "Perishable" => PackageCategory::Perishable,
            "Fragile" => PackageCategory::Fragile,
            _ => PackageCategory::Others,
        }
    }
}

impl Default for PackageCategory {
    fn default() -> Self {
        PackageCategory::Others
    }
}

impl fmt::Display for PackageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Distance class for a pickup/delivery pair
///
/// Produced by the PIN-prefix classification chain; each class maps to a
/// rate multiplier in the rate card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistanceClass {
    /// Same 3-digit PIN prefix
    Local,
    /// Both endpoints in metro cities
    Metro,
    /// Same PIN region (prefix / 10)
    Regional,
    /// Same PIN zone (prefix / 100)
    Zonal,
    /// Cross-zone, and the conservative default when PIN data is missing
    National,
    /// Either endpoint in the northeast
    Northeast,
    /// Either endpoint a hill station
    HillStation,
    /// Either endpoint in a remote area
    Remote,
}

impl DistanceClass {
    /// All distance classes; the rate card must price every one
    pub const ALL: [DistanceClass; 8] = [
        DistanceClass::Local,
        DistanceClass::Metro,
        DistanceClass::Regional,
        DistanceClass::Zonal,
        DistanceClass::National,
        DistanceClass::Northeast,
        DistanceClass::HillStation,
        DistanceClass::Remote,
    ];

    /// Class name as used by the rate card
    pub fn code(&self) -> &'static str {
        match self {
            DistanceClass::Local => "local",
            DistanceClass::Metro => "metro",
            DistanceClass::Regional => "regional",
            DistanceClass::Zonal => "zonal",
            DistanceClass::National => "national",
            DistanceClass::Northeast => "northeast",
            DistanceClass::HillStation => "hillStation",
            DistanceClass::Remote => "remote",
        }
    }
}

impl fmt::Display for DistanceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// ISO 4217 currency code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Currency {
    /// Indian Rupee
    INR,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
        }
    }

    /// Smallest-unit subdivisions per whole unit (paise per rupee)
    pub fn smallest_unit_factor(&self) -> Decimal {
        match self {
            Currency::INR => Decimal::ONE_HUNDRED,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::INR
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Package dimensions in centimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    /// Length in centimetres
    pub length_cm: f64,

    /// Width in centimetres
    pub width_cm: f64,

    /// Height in centimetres
    pub height_cm: f64,
}

impl Dimensions {
    /// Create new dimensions
    pub fn new(length_cm: f64, width_cm: f64, height_cm: f64) -> Self {
        Self {
            length_cm,
            width_cm,
            height_cm,
        }
    }

    /// True when all three dimensions are present and positive
    pub fn is_valid(&self) -> bool {
        self.length_cm > 0.0 && self.width_cm > 0.0 && self.height_cm > 0.0
    }

    /// Synthetic weight approximating the space the package occupies
    pub fn volumetric_weight_kg(&self) -> f64 {
        self.length_cm * self.width_cm * self.height_cm / VOLUMETRIC_DIVISOR
    }

    /// True when any single side exceeds the oversize limit
    pub fn is_oversized(&self) -> bool {
        self.length_cm > OVERSIZE_LIMIT_CM
            || self.width_cm > OVERSIZE_LIMIT_CM
            || self.height_cm > OVERSIZE_LIMIT_CM
    }
}

/// Package description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Actual weight in kilograms (must be positive)
    pub weight_kg: f64,

    /// Contents category
    #[serde(default)]
    pub category: PackageCategory,

    /// Declared value for insurance, in rupees
    #[serde(default)]
    pub declared_value: Decimal,

    /// Physical dimensions, when measured
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
}

impl Package {
    /// Package with a weight and all other fields defaulted
    pub fn new(weight_kg: f64) -> Self {
        Self {
            weight_kg,
            category: PackageCategory::default(),
            declared_value: Decimal::ZERO,
            dimensions: None,
        }
    }
}

/// Delivery options selected by the sender
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOptions {
    /// Cash to collect on delivery, in rupees (0 = prepaid)
    #[serde(default)]
    pub cod_amount: Decimal,

    /// Deliver to the door rather than the nearest hub
    #[serde(default)]
    pub door_delivery: bool,

    /// Require receiver signature
    #[serde(default)]
    pub signature_required: bool,

    /// Deliver in a chosen time slot
    #[serde(default)]
    pub scheduled_delivery: bool,

    /// Allow Saturday/Sunday delivery
    #[serde(default)]
    pub weekend_delivery: bool,
}

/// A request to price one shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentQuoteRequest {
    /// Package being shipped
    pub package: Package,

    /// Requested service tier
    pub service: ServiceType,

    /// Pickup PIN code
    #[serde(default)]
    pub pickup_pincode: Option<String>,

    /// Delivery PIN code
    #[serde(default)]
    pub delivery_pincode: Option<String>,

    /// Selected delivery options
    #[serde(default)]
    pub options: DeliveryOptions,
}

/// Weights entering the price computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightDetails {
    /// Actual weight in kilograms
    pub actual_kg: f64,

    /// Volumetric weight in kilograms (0 without dimensions)
    pub volumetric_kg: f64,

    /// Greater of actual and volumetric; the pricing basis
    pub billable_kg: f64,
}

/// Service facts accompanying a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateDetails {
    /// Service tier priced
    pub service_type: ServiceType,

    /// Transit window for the service
    pub transit_days: TransitDays,

    /// Projected delivery date
    pub estimated_delivery_date: NaiveDate,

    /// Weight facts
    pub weight: WeightDetails,
}

/// Line-item price breakdown
///
/// Monetary items are rounded to whole rupees for display; multipliers
/// are reported as configured. Optional charges are absent when they do
/// not apply or round from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateBreakdown {
    /// Weight charge after discount and minimum-charge floor
    pub base_amount: Decimal,

    /// Configured rate per kilogram for the service
    pub rate_per_kg: Decimal,

    /// Category multiplier applied
    pub category_multiplier: Decimal,

    /// Distance multiplier applied
    pub distance_multiplier: Decimal,

    /// Weight-slab discount subtracted from the base
    pub discount: Decimal,

    /// Fuel surcharge (always present)
    pub fuel_surcharge: Decimal,

    /// COD collection fee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cod_charges: Option<Decimal>,

    /// Remote-area delivery fee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_area_charges: Option<Decimal>,

    /// Oversized-package fee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oversize_charges: Option<Decimal>,

    /// Fragile handling fee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragile_handling: Option<Decimal>,

    /// Door delivery fee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door_delivery: Option<Decimal>,

    /// Signature-on-delivery fee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_required: Option<Decimal>,

    /// Scheduled-slot fee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_delivery: Option<Decimal>,

    /// Weekend delivery fee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekend_delivery: Option<Decimal>,

    /// Insurance premium on the declared value (0 when uninsured)
    pub insurance: Decimal,

    /// Base plus all additional charges, pre-tax
    pub subtotal: Decimal,

    /// Goods and services tax on the subtotal
    pub gst: Decimal,

    /// Payable total, rounded to whole rupees
    pub total: Decimal,
}

/// Payment facts forwarded to the payment gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    /// Payable total in the currency's smallest unit (paise)
    pub amount_in_smallest_unit: i64,

    /// Payment currency
    pub currency_code: Currency,

    /// Cash to collect on delivery, in rupees
    pub cod_amount: Decimal,

    /// Human-readable order description
    pub description: String,
}

/// A priced shipment: one per request, never stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentQuote {
    /// Service facts
    pub rate_details: RateDetails,

    /// Line-item breakdown
    pub breakdown: RateBreakdown,

    /// Payment facts
    pub payment_info: PaymentInfo,
}

/// Result of a service-availability check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAvailability {
    /// Whether the service can be booked for the lane
    pub available: bool,

    /// Why the service is unavailable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ServiceAvailability {
    /// Service can be booked
    pub fn available() -> Self {
        Self {
            available: true,
            reason: None,
        }
    }

    /// Service cannot be booked
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            available: false,
            reason: Some(reason.into()),
        }
    }
}
