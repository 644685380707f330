//! Tiered-range (slab) tables
//!
//! A slab is a half-open numeric band `(min, max]` carrying a rate
//! fraction. The weight-discount and insurance tables are both ordered
//! slab lists; lookup is first-match-wins so the priority order stays
//! auditable and testable in isolation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Half-open pricing band matching values in `(min_exclusive, max_inclusive]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slab {
    /// Exclusive lower bound
    pub min_exclusive: Decimal,

    /// Inclusive upper bound; `None` leaves the band unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_inclusive: Option<Decimal>,

    /// Rate applied to values in this band
    pub fraction: Decimal,
}

impl Slab {
    /// Create a bounded band
    pub fn new(min_exclusive: Decimal, max_inclusive: Decimal, fraction: Decimal) -> Self {
        Self {
            min_exclusive,
            max_inclusive: Some(max_inclusive),
            fraction,
        }
    }

    /// Create the unbounded top band
    pub fn open_ended(min_exclusive: Decimal, fraction: Decimal) -> Self {
        Self {
            min_exclusive,
            max_inclusive: None,
            fraction,
        }
    }

    /// Whether a value falls inside this band
    pub fn contains(&self, value: Decimal) -> bool {
        value > self.min_exclusive && self.max_inclusive.map_or(true, |max| value <= max)
    }
}

/// First slab matching a value
pub fn find_slab(slabs: &[Slab], value: Decimal) -> Option<&Slab> {
    slabs.iter().find(|slab| slab.contains(value))
}

/// Validate that a slab list covers `(0, ∞)` with no gaps or overlaps
///
/// The list must be non-empty, start at zero, be sorted ascending and
/// contiguous, and end with an unbounded band.
pub fn validate_slabs(name: &str, slabs: &[Slab]) -> Result<()> {
    let first = slabs
        .first()
        .ok_or_else(|| Error::Config(format!("{name} slab table is empty")))?;

    if first.min_exclusive != Decimal::ZERO {
        return Err(Error::Config(format!(
            "{name} slab table must start at 0, starts at {}",
            first.min_exclusive
        )));
    }

    for (i, slab) in slabs.iter().enumerate() {
        if slab.fraction < Decimal::ZERO {
            return Err(Error::Config(format!(
                "{name} slab {i} has a negative fraction {}",
                slab.fraction
            )));
        }

        match slab.max_inclusive {
            Some(max) => {
                if max <= slab.min_exclusive {
                    return Err(Error::Config(format!(
                        "{name} slab {i} is empty: ({}, {}]",
                        slab.min_exclusive, max
                    )));
                }
                match slabs.get(i + 1) {
                    Some(next) if next.min_exclusive != max => {
                        return Err(Error::Config(format!(
                            "{name} slab table is not contiguous: band ends at {} but the next starts after {}",
                            max, next.min_exclusive
                        )));
                    }
                    Some(_) => {}
                    None => {
                        return Err(Error::Config(format!(
                            "{name} slab table must end with an unbounded band"
                        )));
                    }
                }
            }
            None => {
                if i + 1 != slabs.len() {
                    return Err(Error::Config(format!(
                        "{name} slab {i} is unbounded but not last"
                    )));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<Slab> {
        vec![
            Slab::new(Decimal::ZERO, Decimal::new(5, 1), Decimal::ZERO),
            Slab::new(Decimal::new(5, 1), Decimal::new(2, 0), Decimal::new(5, 2)),
            Slab::new(Decimal::new(2, 0), Decimal::new(5, 0), Decimal::new(8, 2)),
            Slab::open_ended(Decimal::new(5, 0), Decimal::new(12, 2)),
        ]
    }

    #[test]
    fn test_boundary_lands_in_lower_slab() {
        let slabs = table();

        // Exactly 2kg matches (0.5, 2], not (2, 5]
        let slab = find_slab(&slabs, Decimal::new(2, 0)).unwrap();
        assert_eq!(slab.fraction, Decimal::new(5, 2));

        // Just above the boundary moves up a band
        let slab = find_slab(&slabs, Decimal::new(201, 2)).unwrap();
        assert_eq!(slab.fraction, Decimal::new(8, 2));
    }

    #[test]
    fn test_zero_matches_nothing() {
        assert!(find_slab(&table(), Decimal::ZERO).is_none());
    }

    #[test]
    fn test_open_ended_band_catches_large_values() {
        let slabs = table();
        let slab = find_slab(&slabs, Decimal::new(1_000_000, 0)).unwrap();
        assert_eq!(slab.fraction, Decimal::new(12, 2));
    }

    #[test]
    fn test_valid_table_passes() {
        assert!(validate_slabs("weight", &table()).is_ok());
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(validate_slabs("weight", &[]).is_err());
    }

    #[test]
    fn test_gap_rejected() {
        let slabs = vec![
            Slab::new(Decimal::ZERO, Decimal::new(2, 0), Decimal::ZERO),
            Slab::open_ended(Decimal::new(3, 0), Decimal::new(5, 2)),
        ];
        assert!(validate_slabs("weight", &slabs).is_err());
    }

    #[test]
    fn test_bounded_tail_rejected() {
        let slabs = vec![
            Slab::new(Decimal::ZERO, Decimal::new(2, 0), Decimal::ZERO),
            Slab::new(Decimal::new(2, 0), Decimal::new(5, 0), Decimal::new(5, 2)),
        ];
        assert!(validate_slabs("weight", &slabs).is_err());
    }

    #[test]
    fn test_nonzero_start_rejected() {
        let slabs = vec![Slab::open_ended(Decimal::ONE, Decimal::ZERO)];
        assert!(validate_slabs("weight", &slabs).is_err());
    }
}
