use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use color_eyre::{Result, eyre::eyre};

use crate::ports::clock::Clock;

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a stored show start time.
///
/// Values carrying an offset keep it. Naive values are read as local time in
/// `zone`; a local time skipped by a DST transition is rejected.
pub fn parse_start_time(value: &str, zone: Tz) -> Result<DateTime<FixedOffset>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed);
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| eyre!("Unrecognized start time: '{}'", value))?;

    zone.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.fixed_offset())
        .ok_or_else(|| eyre!("Start time '{}' does not exist in {}", value, zone))
}

/// Where a show falls relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTiming {
    Upcoming,
    Past,
}

/// Shows split by [`ShowTiming`]; every input lands in exactly one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buckets<T> {
    pub upcoming: Vec<T>,
    pub past: Vec<T>,
}

impl<T> Default for Buckets<T> {
    fn default() -> Self {
        Self {
            upcoming: Vec::new(),
            past: Vec::new(),
        }
    }
}

/// Decides whether shows are upcoming, relative to the injected clock.
#[derive(Clone)]
pub struct Schedule {
    clock: Arc<dyn Clock>,
    zone: Tz,
}

impl Schedule {
    pub fn new(clock: Arc<dyn Clock>, zone: Tz) -> Self {
        Self { clock, zone }
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// A show is upcoming when it starts strictly after `now`
    pub fn timing_at(&self, start_time: &str, now: DateTime<Utc>) -> Result<ShowTiming> {
        let start = parse_start_time(start_time, self.zone)?;
        if start.with_timezone(&Utc) > now {
            Ok(ShowTiming::Upcoming)
        } else {
            Ok(ShowTiming::Past)
        }
    }

    /// Split `shows` into upcoming and past, keeping input order within each bucket.
    ///
    /// "Now" is read once so that every show is judged against the same instant.
    pub fn partition<T>(
        &self,
        shows: impl IntoIterator<Item = T>,
        start_time: impl Fn(&T) -> &str,
    ) -> Result<Buckets<T>> {
        let now = self.clock.now();
        let mut buckets = Buckets::default();

        for show in shows {
            match self.timing_at(start_time(&show), now)? {
                ShowTiming::Upcoming => buckets.upcoming.push(show),
                ShowTiming::Past => buckets.past.push(show),
            }
        }

        Ok(buckets)
    }

    /// Number of upcoming shows per `key`, for the listing pages.
    ///
    /// Unlike [`Schedule::partition`] this never fails: a start time that
    /// can't be parsed is logged and counted as past.
    pub fn upcoming_counts<T>(
        &self,
        shows: impl IntoIterator<Item = T>,
        key: impl Fn(&T) -> i64,
        start_time: impl Fn(&T) -> &str,
    ) -> HashMap<i64, usize> {
        let now = self.clock.now();
        let mut counts = HashMap::new();

        for show in shows {
            match self.timing_at(start_time(&show), now) {
                Ok(ShowTiming::Upcoming) => *counts.entry(key(&show)).or_insert(0) += 1,
                Ok(ShowTiming::Past) => {}
                Err(e) => log::warn!("Counting show as past: {}", e),
            }
        }

        counts
    }
}

#[cfg(test)]
pub(crate) fn fixed_schedule(now: &str) -> Schedule {
    use crate::ports::clock::MockClock;

    let now = DateTime::parse_from_rfc3339(now).unwrap().with_timezone(&Utc);
    let mut clock = MockClock::new();
    clock.expect_now().return_const(now);
    Schedule::new(Arc::new(clock), chrono_tz::America::Los_Angeles)
}
