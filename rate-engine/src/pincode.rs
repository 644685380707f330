//! PIN-code geography
//!
//! The first three digits of an Indian postal code act as a coarse
//! geographic proxy: prefix sets tag metro, northeast, hill-station and
//! remote areas, and prefix arithmetic groups codes into regions
//! (prefix / 10) and zones (prefix / 100).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::types::DistanceClass;

/// First three digits of an Indian postal code
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PinPrefix(u16);

impl PinPrefix {
    /// Create from a known 3-digit prefix
    pub fn new(prefix: u16) -> Self {
        Self(prefix)
    }

    /// Extract the prefix from a full PIN code
    ///
    /// Requires at least three leading ASCII digits; anything else is
    /// treated as missing PIN data.
    pub fn parse(pincode: &str) -> Option<Self> {
        let head = pincode.trim().get(..3)?;
        if !head.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        head.parse::<u16>().ok().map(Self)
    }

    /// The raw 3-digit prefix
    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// Region group (prefix / 10)
    pub fn region_group(self) -> u16 {
        self.0 / 10
    }

    /// Zone group (prefix / 100)
    pub fn zone_group(self) -> u16 {
        self.0 / 100
    }
}

impl fmt::Display for PinPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// Geographic tags over PIN prefixes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PincodeClassification {
    /// Metro-city prefixes
    pub metro: BTreeSet<PinPrefix>,

    /// Northeast-region prefixes
    pub northeast: BTreeSet<PinPrefix>,

    /// Hill-station prefixes
    pub hill_station: BTreeSet<PinPrefix>,

    /// Remote-area prefixes (islands, high-altitude districts)
    pub remote: BTreeSet<PinPrefix>,
}

impl PincodeClassification {
    /// Whether the prefix is in a metro city
    pub fn is_metro(&self, prefix: PinPrefix) -> bool {
        self.metro.contains(&prefix)
    }

    /// Whether the prefix is in the northeast
    pub fn is_northeast(&self, prefix: PinPrefix) -> bool {
        self.northeast.contains(&prefix)
    }

    /// Whether the prefix is a hill station
    pub fn is_hill_station(&self, prefix: PinPrefix) -> bool {
        self.hill_station.contains(&prefix)
    }

    /// Whether the prefix is in a remote area
    pub fn is_remote(&self, prefix: PinPrefix) -> bool {
        self.remote.contains(&prefix)
    }
}

/// Classify the distance between two endpoints
///
/// Strict first-match-wins priority chain; the order is normative:
/// missing data → national, equal prefixes → local, both metro → metro,
/// then northeast, hill station, remote tags on either endpoint, then
/// region and zone grouping, and national as the fallback.
pub fn classify_distance(
    pickup: Option<PinPrefix>,
    delivery: Option<PinPrefix>,
    tags: &PincodeClassification,
) -> DistanceClass {
    let (pickup, delivery) = match (pickup, delivery) {
        (Some(pickup), Some(delivery)) => (pickup, delivery),
        _ => return DistanceClass::National,
    };

    if pickup == delivery {
        return DistanceClass::Local;
    }
    if tags.is_metro(pickup) && tags.is_metro(delivery) {
        return DistanceClass::Metro;
    }
    if tags.is_northeast(pickup) || tags.is_northeast(delivery) {
        return DistanceClass::Northeast;
    }
    if tags.is_hill_station(pickup) || tags.is_hill_station(delivery) {
        return DistanceClass::HillStation;
    }
    if tags.is_remote(pickup) || tags.is_remote(delivery) {
        return DistanceClass::Remote;
    }
    if pickup.region_group() == delivery.region_group() {
        return DistanceClass::Regional;
    }
    if pickup.zone_group() == delivery.zone_group() {
        return DistanceClass::Zonal;
    }

    DistanceClass::National
}
