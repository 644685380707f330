//! Shipment rating engine for ShipNest
//!
//! Deterministic price quotes for shipment bookings: weight-slab
//! pricing with volumetric weights, distance classification over
//! PIN-code prefixes, surcharges and per-option fees, GST, declared-value
//! insurance, and delivery-date estimation.
//!
//! # Design
//!
//! A quote is a pure function of (request, rate card, reference date):
//! no I/O, no randomness, no shared mutable state. The rate card is
//! validated once at engine construction and read-only afterwards, so a
//! single [`RateEngine`] serves any number of concurrent callers without
//! locking. Business-rule violations come back as structured errors, not
//! panics, before any monetary computation runs.
//!
//! # Example
//!
//! ```
//! use rate_engine::{Package, RateConfig, RateEngine, ServiceType, ShipmentQuoteRequest};
//!
//! # fn main() -> rate_engine::Result<()> {
//! let engine = RateEngine::new(RateConfig::default())?;
//!
//! let request = ShipmentQuoteRequest {
//!     package: Package::new(2.5),
//!     service: ServiceType::Standard,
//!     pickup_pincode: Some("110001".to_string()),
//!     delivery_pincode: Some("400001".to_string()),
//!     options: Default::default(),
//! };
//!
//! let quote = engine.quote(&request)?;
//! println!(
//!     "Total {} INR, delivery by {}",
//!     quote.breakdown.total, quote.rate_details.estimated_delivery_date
//! );
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod delivery;
pub mod engine;
pub mod error;
pub mod pincode;
pub mod slab;
pub mod types;

// Re-exports
pub use config::{ChargeTable, RateConfig, ServiceRate};
pub use delivery::TransitDays;
pub use engine::RateEngine;
pub use error::{Error, Result};
pub use types::*;
