//! Pairwise overlap detection.

use chrono::Duration;
use serde::Serialize;
use tracing::debug;

use crate::event::Event;
use crate::time::Instant;

/// Two events whose times overlap.
///
/// `first` starts no later than `second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Conflict<'a> {
    pub first: &'a Event,
    pub second: &'a Event,
}

impl Conflict<'_> {
    /// Length of the shared time, or `None` if either boundary is missing.
    pub fn overlap(&self) -> Option<Duration> {
        let end = self.first.end_instant()?.min(self.second.end_instant()?);
        Some(end - self.second.start_instant()?)
    }
}

/// Returns every pair of overlapping timed events.
///
/// Only events with both a start and an end instant take part. They are
/// ordered by start (stable, so ties keep input order), and for each pair
/// `(i, j)` with `i < j` the pair is reported when `j` starts before `i`
/// ends. Each pair is tested on its own: an event is compared against every
/// earlier event's end, not against a running maximum.
///
/// Pairs come out grouped by the earlier event, then by the later one.
pub fn detect_conflicts(events: &[Event]) -> Vec<Conflict<'_>> {
    let mut timed: Vec<(Instant, Instant, &Event)> = events
        .iter()
        .filter_map(|e| Some((e.start_instant()?, e.end_instant()?, e)))
        .collect();
    timed.sort_by_key(|(start, _, _)| *start);

    let mut conflicts = Vec::new();
    for (i, (_, end_i, first)) in timed.iter().enumerate() {
        for (start_j, _, second) in &timed[i + 1..] {
            if start_j < end_i {
                conflicts.push(Conflict {
                    first: *first,
                    second: *second,
                });
            }
        }
    }

    debug!(
        events = events.len(),
        timed = timed.len(),
        conflicts = conflicts.len(),
        "detected conflicts"
    );
    conflicts
}
