//! Calendar helpers shared by the aggregation engines.
//!
//! Timestamps are stored in UTC. "Today" is a calendar day in the configured
//! reference timezone and is captured once per computation through
//! [`DayReference`], so a request that straddles midnight still compares every
//! entry against the same day.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use chrono_tz::Tz;

/// The reference day used by a single aggregation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayReference {
    pub tz: Tz,
    pub today: NaiveDate,
}

impl DayReference {
    /// Capture "today" in `tz` from the given instant.
    #[must_use]
    pub fn at(tz: Tz, now: DateTime<Utc>) -> Self {
        Self {
            tz,
            today: day_key(now, tz),
        }
    }

    /// Capture "today" in `tz` from the wall clock.
    #[must_use]
    pub fn now(tz: Tz) -> Self {
        Self::at(tz, Utc::now())
    }

    /// Returns `true` when `timestamp` falls on the reference day.
    #[must_use]
    pub fn is_today(&self, timestamp: DateTime<Utc>) -> bool {
        day_key(timestamp, self.tz) == self.today
    }
}

/// Calendar date of `timestamp` in `tz`.
#[must_use]
pub fn day_key(timestamp: DateTime<Utc>, tz: Tz) -> NaiveDate {
    timestamp.with_timezone(&tz).date_naive()
}

/// Drop sub-second precision, matching what the store keeps.
#[must_use]
pub fn normalize_timestamp(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(0)
}

/// Parse a timezone name, as found in settings.
pub fn parse_timezone(name: &str) -> Result<Tz, String> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| format!("unknown timezone: {name}"))
}
