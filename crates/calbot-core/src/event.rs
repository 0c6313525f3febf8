//! Event types for calendar events.
//!
//! - [`Event`]: an immutable snapshot of one calendar entry
//! - [`EventSummary`]: a flattened, display-ready analysis of an event

use std::collections::BTreeSet;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::time::{EventTime, Instant};

/// Title shown for events that have none.
pub const UNTITLED: &str = "(untitled)";

/// A calendar event as seen by the scheduling components.
///
/// Boundaries are `None` when the source omitted them or when they could
/// not be parsed; such events are skipped by any computation that needs
/// instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Opaque identifier from the calendar source.
    pub id: String,
    /// The event title; may be empty.
    pub title: String,
    /// When the event starts.
    pub start: Option<EventTime>,
    /// When the event ends.
    pub end: Option<EventTime>,
    /// Organizer and attendee identifiers, deduplicated.
    pub participants: BTreeSet<String>,
    /// Whether the source carried a recurrence rule.
    pub recurring: bool,
    /// Free-form description, if any.
    pub description: Option<String>,
}

impl Event {
    /// Creates an event with no times, participants or recurrence.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start: None,
            end: None,
            participants: BTreeSet::new(),
            recurring: false,
            description: None,
        }
    }

    /// Builder method to set the start.
    pub fn with_start(mut self, start: EventTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Builder method to set the end.
    pub fn with_end(mut self, end: EventTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Builder method to set both boundaries to instants.
    pub fn with_times(self, start: Instant, end: Instant) -> Self {
        self.with_start(EventTime::Timed(start))
            .with_end(EventTime::Timed(end))
    }

    /// Builder method to add a participant.
    pub fn with_participant(mut self, participant: impl Into<String>) -> Self {
        self.participants.insert(participant.into());
        self
    }

    /// Builder method to mark the event as recurring.
    pub fn with_recurring(mut self, recurring: bool) -> Self {
        self.recurring = recurring;
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the start instant, if the event is timed and it parsed.
    pub fn start_instant(&self) -> Option<Instant> {
        self.start.as_ref().and_then(EventTime::as_instant).copied()
    }

    /// Returns the end instant, if the event is timed and it parsed.
    pub fn end_instant(&self) -> Option<Instant> {
        self.end.as_ref().and_then(EventTime::as_instant).copied()
    }

    /// Returns true if the event starts on a date with no time of day.
    pub fn is_all_day(&self) -> bool {
        self.start.as_ref().is_some_and(EventTime::is_all_day)
    }

    /// Returns `end - start` when both boundaries are instants.
    ///
    /// The result may be negative for malformed events.
    pub fn duration(&self) -> Option<Duration> {
        Some(self.end_instant()? - self.start_instant()?)
    }

    /// Returns the title, or a placeholder when it is empty.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// Builds a flattened summary of this event.
    pub fn summary(&self) -> EventSummary {
        EventSummary {
            id: self.id.clone(),
            title: self.display_title().to_string(),
            start: self.start_instant(),
            end: self.end_instant(),
            duration_minutes: self.duration().map(|d| d.num_minutes()),
            participants: self.participants.iter().cloned().collect(),
            is_recurring: self.recurring,
            is_all_day: self.is_all_day(),
            description: self.description.clone().unwrap_or_default(),
        }
    }
}

/// A display-ready analysis of a single event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub start: Option<Instant>,
    pub end: Option<Instant>,
    pub duration_minutes: Option<i64>,
    pub participants: Vec<String>,
    pub is_recurring: bool,
    pub is_all_day: bool,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    fn at(h: u32, m: u32) -> Instant {
        FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 10, h, m, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builder_defaults() {
        let event = Event::new("e1", "Standup");
        assert_eq!(event.id, "e1");
        assert_eq!(event.title, "Standup");
        assert!(event.start.is_none());
        assert!(event.end.is_none());
        assert!(event.participants.is_empty());
        assert!(!event.recurring);
        assert!(!event.is_all_day());
        assert_eq!(event.duration(), None);
    }

    #[test]
    fn timed_event() {
        let event = Event::new("e1", "Standup").with_times(at(10, 0), at(10, 45));
        assert_eq!(event.start_instant(), Some(at(10, 0)));
        assert_eq!(event.end_instant(), Some(at(10, 45)));
        assert_eq!(event.duration(), Some(Duration::minutes(45)));
        assert!(!event.is_all_day());
    }

    #[test]
    fn all_day_event() {
        let event = Event::new("e1", "Holiday")
            .with_start(EventTime::from_date(date(2025, 3, 15)))
            .with_end(EventTime::from_date(date(2025, 3, 16)));
        assert!(event.is_all_day());
        assert_eq!(event.start_instant(), None);
        assert_eq!(event.duration(), None);
    }

    #[test]
    fn negative_duration_is_reported_as_is() {
        let event = Event::new("e1", "Broken").with_times(at(11, 0), at(10, 0));
        assert_eq!(event.duration(), Some(Duration::hours(-1)));
    }

    #[test]
    fn participants_are_deduplicated() {
        let event = Event::new("e1", "Sync")
            .with_participant("a@example.com")
            .with_participant("b@example.com")
            .with_participant("a@example.com");
        assert_eq!(event.participants.len(), 2);
    }

    #[test]
    fn summary() {
        let event = Event::new("e1", "")
            .with_times(at(10, 0), at(11, 30))
            .with_participant("b@example.com")
            .with_participant("a@example.com")
            .with_recurring(true);

        let summary = event.summary();
        assert_eq!(summary.title, UNTITLED);
        assert_eq!(summary.duration_minutes, Some(90));
        assert_eq!(summary.participants, vec!["a@example.com", "b@example.com"]);
        assert!(summary.is_recurring);
        assert!(!summary.is_all_day);
        assert_eq!(summary.description, "");
    }
}
