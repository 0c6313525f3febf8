//! Free slot search.
//!
//! [`SlotFinder`] walks a bounded number of days starting today and returns
//! the earliest opening of the requested length. It is a greedy
//! earliest-fit search over a fixed scan order:
//!
//! 1. Days ascend from today.
//! 2. A day on which no event starts is free, and its window start wins
//!    immediately.
//! 3. Otherwise the events, sorted once by start for the whole search, are
//!    scanned in order. For each event the candidate gaps are tried as
//!    *before* (only for the first event overall), *between* (this event's
//!    end and the next event's start, both on the day), then *after* (only
//!    for the last event overall, up to the window end).

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{CoreError, CoreResult};
use crate::event::Event;
use crate::time::{Instant, Interval, TimeParser, TimeWindow};

/// Default number of days searched.
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// How a day with no events is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPolicy {
    /// A free day yields `[window start, window start + duration]` even when
    /// that runs past the window end.
    #[default]
    Legacy,
    /// A free day only yields a slot if the duration fits in the window;
    /// otherwise the day is skipped.
    Strict,
}

/// One scheduled event reduced to what the search needs.
#[derive(Debug, Clone, Copy)]
struct Booking {
    start: Instant,
    end: Option<Instant>,
}

/// Finds the earliest open interval in a bounded horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotFinder {
    parser: TimeParser,
    policy: SlotPolicy,
}

impl SlotFinder {
    /// Creates a finder that resolves days in the parser's timezone.
    pub fn new(parser: TimeParser) -> Self {
        Self {
            parser,
            policy: SlotPolicy::default(),
        }
    }

    /// Builder method to set the free-day policy.
    pub fn with_policy(mut self, policy: SlotPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the free-day policy.
    pub fn policy(&self) -> SlotPolicy {
        self.policy
    }

    /// Finds a slot starting from the current day.
    ///
    /// See [`find_slot_at`](Self::find_slot_at).
    pub fn find_slot(
        &self,
        events: &[Event],
        duration: Duration,
        horizon_days: u32,
        window: TimeWindow,
    ) -> CoreResult<Option<Interval>> {
        self.find_slot_at(Utc::now(), events, duration, horizon_days, window)
    }

    /// Finds a slot searching `horizon_days` days from the day containing `now`.
    ///
    /// Returns `Ok(None)` when nothing fits. Only events with a start
    /// instant occupy time; all-day and unparseable events are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] if `duration` is not positive.
    pub fn find_slot_at(
        &self,
        now: DateTime<Utc>,
        events: &[Event],
        duration: Duration,
        horizon_days: u32,
        window: TimeWindow,
    ) -> CoreResult<Option<Interval>> {
        if duration <= Duration::zero() {
            return Err(CoreError::invalid_argument(format!(
                "slot duration must be positive, got {} minutes",
                duration.num_minutes()
            )));
        }

        let mut bookings: Vec<Booking> = events
            .iter()
            .filter_map(|e| {
                Some(Booking {
                    start: e.start_instant()?,
                    end: e.end_instant(),
                })
            })
            .collect();
        bookings.sort_by_key(|b| b.start);

        let today = self.parser.today(now);
        debug!(
            %today,
            horizon_days,
            bookings = bookings.len(),
            duration_minutes = duration.num_minutes(),
            "searching for free slot"
        );

        for offset in 0..horizon_days {
            let Some(day) = today.checked_add_days(chrono::Days::new(u64::from(offset))) else {
                break;
            };
            if let Some(slot) = self.search_day(day, &bookings, duration, window) {
                debug!(%day, start = %slot.start, end = %slot.end, "found free slot");
                return Ok(Some(slot));
            }
        }

        debug!(horizon_days, "no free slot within horizon");
        Ok(None)
    }

    fn search_day(
        &self,
        day: NaiveDate,
        bookings: &[Booking],
        duration: Duration,
        window: TimeWindow,
    ) -> Option<Interval> {
        let (Some(day_start), Some(day_end)) = (
            self.parser.at(day, window.min_time()),
            self.parser.at(day, window.max_time()),
        ) else {
            warn!(%day, "cannot resolve work window on this day, skipping");
            return None;
        };

        let on_day = |instant: &Instant| self.parser.date_of(instant) == day;

        if !bookings.iter().any(|b| on_day(&b.start)) {
            let limit = match self.policy {
                SlotPolicy::Legacy => None,
                SlotPolicy::Strict => Some(day_end),
            };
            let slot = Interval::from_duration(day_start, duration)
                .filter(|slot| limit.is_none_or(|limit| slot.end <= limit));
            if slot.is_none() {
                trace!(%day, "free day shorter than requested duration");
            }
            return slot;
        }

        let last = bookings.len() - 1;
        for (i, booking) in bookings.iter().enumerate() {
            if i == 0
                && on_day(&booking.start)
                && let Some(slot) = fit(day_start, duration, booking.start)
            {
                return Some(slot);
            }

            let Some(end) = booking.end.filter(|end| on_day(end)) else {
                continue;
            };

            if let Some(next) = bookings.get(i + 1)
                && on_day(&next.start)
                && let Some(slot) = fit(end, duration, next.start)
            {
                return Some(slot);
            }

            if i == last
                && let Some(slot) = fit(end, duration, day_end)
            {
                return Some(slot);
            }
        }

        None
    }
}

/// The slot `[start, start + duration]` if it ends no later than `limit`.
fn fit(start: Instant, duration: Duration, limit: Instant) -> Option<Interval> {
    Interval::from_duration(start, duration).filter(|slot| slot.end <= limit)
}
