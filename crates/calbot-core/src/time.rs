//! Time types and timestamp parsing.
//!
//! This module provides:
//! - [`TimeParser`]: normalizes calendar timestamps into timezone-aware
//!   [`Instant`]s, interpreting naive input in a configured default zone
//! - [`EventTime`]: an event boundary, either a timed instant or an all-day date
//! - [`Interval`]: a closed `[start, end]` pair of instants
//! - [`TimeWindow`]: a daily time-of-day range applied to every searched day

use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CoreError, CoreResult};

/// An absolute point in time with a resolved UTC offset.
///
/// The offset is the one carried by the source timestamp, or the default
/// zone's offset at that moment when the source had none.
pub type Instant = DateTime<FixedOffset>;

/// Timezone used when no explicit zone is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Santiago;

/// Naive datetime layouts accepted after RFC 3339 fails.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Offset-bearing layouts that RFC 3339 rejects (missing seconds, space separator).
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M%:z",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses calendar timestamps into timezone-aware instants.
///
/// The parser owns its default timezone; two parsers with different zones
/// can be used side by side.
///
/// # Example
///
/// ```
/// use calbot_core::TimeParser;
///
/// let parser = TimeParser::from_name("Europe/Paris").unwrap();
/// let instant = parser.parse(Some("2025-03-10T10:00:00")).unwrap();
/// assert_eq!(instant.offset().local_minus_utc(), 3600);
/// assert!(parser.parse(Some("not a date")).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParser {
    timezone: Tz,
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

impl TimeParser {
    /// Creates a parser with the given default timezone.
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Creates a parser from an IANA timezone name.
    pub fn from_name(name: &str) -> CoreResult<Self> {
        let timezone = name
            .trim()
            .parse::<Tz>()
            .map_err(|_| CoreError::unknown_timezone(name))?;
        Ok(Self::new(timezone))
    }

    /// Returns the default timezone.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Parses a timestamp.
    ///
    /// Empty or missing input yields `None`. Input with an explicit offset
    /// keeps that offset; naive input (including a bare date, read as
    /// midnight) is interpreted in the default timezone. Anything else is
    /// logged and yields `None`.
    pub fn parse(&self, raw: Option<&str>) -> Option<Instant> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt);
        }

        for fmt in OFFSET_DATETIME_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
                return Some(dt);
            }
        }

        for fmt in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
                return self.localize(naive);
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            return self.at(date, NaiveTime::MIN);
        }

        warn!(input = raw, "failed to parse timestamp");
        None
    }

    /// Parses a bare calendar date (`YYYY-MM-DD`).
    ///
    /// Same contract as [`parse`](Self::parse): missing input is `None`,
    /// malformed input is logged and `None`.
    pub fn parse_date(&self, raw: Option<&str>) -> Option<NaiveDate> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
        match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(e) => {
                warn!(input = raw, error = %e, "failed to parse date");
                None
            }
        }
    }

    /// Attaches the default timezone to a naive datetime.
    ///
    /// Ambiguous local times (clocks going back) resolve to the earlier
    /// instant. Local times skipped by a forward transition move forward by
    /// one hour.
    pub fn localize(&self, naive: NaiveDateTime) -> Option<Instant> {
        let resolved = self
            .timezone
            .from_local_datetime(&naive)
            .earliest()
            .or_else(|| {
                self.timezone
                    .from_local_datetime(&(naive + Duration::hours(1)))
                    .earliest()
            });

        if resolved.is_none() {
            warn!(local = %naive, timezone = %self.timezone, "local time does not exist");
        }
        resolved.map(|dt| dt.fixed_offset())
    }

    /// Returns the instant at `time` on `date` in the default timezone.
    pub fn at(&self, date: NaiveDate, time: NaiveTime) -> Option<Instant> {
        self.localize(date.and_time(time))
    }

    /// Returns the calendar date of an instant as seen in the default timezone.
    pub fn date_of(&self, instant: &Instant) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }

    /// Returns today's date in the default timezone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.timezone).date_naive()
    }
}

/// Represents the start or end of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EventTime {
    /// A specific instant.
    Timed(Instant),
    /// A calendar date with no time of day.
    AllDay(NaiveDate),
}

impl EventTime {
    /// Creates a timed event boundary from a datetime in any timezone.
    pub fn from_datetime<Tz2: TimeZone>(dt: DateTime<Tz2>) -> Self {
        Self::Timed(dt.fixed_offset())
    }

    /// Creates an all-day event boundary.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::AllDay(date)
    }

    /// Returns `true` if this is a date without a time.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay(_))
    }

    /// Returns `true` if this is a specific instant.
    pub fn is_timed(&self) -> bool {
        matches!(self, Self::Timed(_))
    }

    /// Returns the instant for timed boundaries.
    pub fn as_instant(&self) -> Option<&Instant> {
        match self {
            Self::Timed(dt) => Some(dt),
            Self::AllDay(_) => None,
        }
    }

    /// Returns the date for all-day boundaries.
    pub fn as_date(&self) -> Option<&NaiveDate> {
        match self {
            Self::AllDay(d) => Some(d),
            Self::Timed(_) => None,
        }
    }
}

/// A closed interval between two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Start of the interval.
    pub start: Instant,
    /// End of the interval.
    pub end: Instant,
}

impl Interval {
    /// Creates a new interval.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: Instant, end: Instant) -> Self {
        assert!(start <= end, "Interval start must be <= end");
        Self { start, end }
    }

    /// Creates an interval from a start instant and a non-negative duration.
    ///
    /// Returns `None` if the end falls outside the representable range.
    pub fn from_duration(start: Instant, duration: Duration) -> Option<Self> {
        let end = start.checked_add_signed(duration)?;
        Some(Self::new(start, end))
    }

    /// Returns the length of the interval.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// A daily time-of-day range, applied identically to every day searched.
///
/// `min_time` is always strictly before `max_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    min_time: NaiveTime,
    max_time: NaiveTime,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            min_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            max_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl TimeWindow {
    /// Creates a window, rejecting empty or inverted ranges.
    pub fn new(min_time: NaiveTime, max_time: NaiveTime) -> CoreResult<Self> {
        if min_time >= max_time {
            return Err(CoreError::invalid_argument(format!(
                "work window start {} must be before end {}",
                min_time.format("%H:%M"),
                max_time.format("%H:%M")
            )));
        }
        Ok(Self { min_time, max_time })
    }

    /// Creates a window from two `HH:MM` strings.
    pub fn parse(min_time: &str, max_time: &str) -> CoreResult<Self> {
        Self::new(parse_time_of_day(min_time)?, parse_time_of_day(max_time)?)
    }

    /// Earliest time of day a slot may start.
    pub fn min_time(&self) -> NaiveTime {
        self.min_time
    }

    /// Latest time of day a bounded slot may end.
    pub fn max_time(&self) -> NaiveTime {
        self.max_time
    }

    /// Length of the window on a day without clock changes.
    pub fn length(&self) -> Duration {
        self.max_time - self.min_time
    }
}

/// Parses an `HH:MM` time of day.
pub fn parse_time_of_day(raw: &str) -> CoreResult<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|e| CoreError::invalid_argument(format!("invalid time of day '{raw}': {e}")))
}
