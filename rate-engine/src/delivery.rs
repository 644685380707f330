//! Transit windows and delivery-date projection
//!
//! Transit windows carry the label shown to customers ("0", "1", "4-7")
//! and drive the delivery estimate: the projection always uses the upper
//! bound of the window, and rolls forward past weekends unless weekend
//! delivery was booked.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Transit window in days
///
/// Serializes as its customer-facing label: "0" for same-day, "N" for an
/// exact day count, "A-B" for a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransitDays {
    min_days: u32,
    max_days: u32,
}

impl TransitDays {
    /// Exact day count ("N"); 0 is same-day
    pub fn exact(days: u32) -> Self {
        Self {
            min_days: days,
            max_days: days,
        }
    }

    /// Day range ("A-B")
    pub fn range(min_days: u32, max_days: u32) -> Self {
        debug_assert!(min_days <= max_days);
        Self { min_days, max_days }
    }

    /// Lower bound in days
    pub fn min_days(&self) -> u32 {
        self.min_days
    }

    /// Upper bound in days; the delivery estimate uses this
    pub fn max_days(&self) -> u32 {
        self.max_days
    }

    /// Customer-facing label
    pub fn label(&self) -> String {
        if self.min_days == self.max_days {
            self.min_days.to_string()
        } else {
            format!("{}-{}", self.min_days, self.max_days)
        }
    }
}

impl fmt::Display for TransitDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TransitDays {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim();
        let parse_days = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| Error::Config(format!("invalid transit window '{label}'")))
        };

        match label.split_once('-') {
            Some((min, max)) => {
                let min_days = parse_days(min)?;
                let max_days = parse_days(max)?;
                if min_days > max_days {
                    return Err(Error::Config(format!(
                        "transit window '{label}' is reversed"
                    )));
                }
                Ok(Self { min_days, max_days })
            }
            None => Ok(Self::exact(parse_days(label)?)),
        }
    }
}

impl TryFrom<String> for TransitDays {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<TransitDays> for String {
    fn from(transit: TransitDays) -> Self {
        transit.label()
    }
}

/// Project the estimated delivery date from a reference date
///
/// Adds the upper bound of the transit window; a 0-day window delivers
/// on the reference date itself. Unless weekend delivery was booked, the
/// date rolls forward past Saturday and Sunday to the next weekday.
pub fn project_delivery_date(
    today: NaiveDate,
    transit: TransitDays,
    weekend_delivery: bool,
) -> NaiveDate {
    let mut date = today + Duration::days(i64::from(transit.max_days()));

    if !weekend_delivery {
        while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            date += Duration::days(1);
        }
    }

    date
}
