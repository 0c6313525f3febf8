//! Event filtering.
//!
//! An [`EventFilter`] is a set of optional criteria; an event passes when it
//! satisfies every criterion that is set. Ad-hoc predicates compose with the
//! iterator returned by [`EventFilter::iter`] through ordinary `filter` calls.

use chrono::Duration;

use crate::event::Event;
use crate::time::Instant;

/// Optional criteria for selecting events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Earliest accepted start instant (inclusive).
    pub from: Option<Instant>,
    /// Latest accepted start instant (inclusive).
    pub to: Option<Instant>,
    /// Title substrings; any match retains the event.
    pub title_keywords: Vec<String>,
    /// Whether title matching respects case.
    pub case_sensitive: bool,
    /// Participant identifiers; any match retains the event.
    pub participants: Vec<String>,
    /// Shortest accepted duration (inclusive).
    pub min_duration: Option<Duration>,
    /// Longest accepted duration (inclusive).
    pub max_duration: Option<Duration>,
}

impl EventFilter {
    /// Creates a filter that accepts every event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only events starting at or after `from`.
    pub fn from(mut self, from: Instant) -> Self {
        self.from = Some(from);
        self
    }

    /// Only events starting at or before `to`.
    pub fn to(mut self, to: Instant) -> Self {
        self.to = Some(to);
        self
    }

    /// Only events whose title contains `keyword`.
    pub fn title(mut self, keyword: impl Into<String>) -> Self {
        self.title_keywords.push(keyword.into());
        self
    }

    /// Match titles respecting case.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Only events that include `participant`.
    pub fn participant(mut self, participant: impl Into<String>) -> Self {
        self.participants.push(participant.into());
        self
    }

    /// Only events lasting at least `min`.
    pub fn min_duration(mut self, min: Duration) -> Self {
        self.min_duration = Some(min);
        self
    }

    /// Only events lasting at most `max`.
    pub fn max_duration(mut self, max: Duration) -> Self {
        self.max_duration = Some(max);
        self
    }

    /// Returns true if `event` satisfies every active criterion.
    pub fn matches(&self, event: &Event) -> bool {
        self.matches_range(event)
            && self.matches_title(event)
            && self.matches_participants(event)
            && self.matches_duration(event)
    }

    /// Iterates over the events that pass, in input order.
    pub fn iter<'a, 'f>(
        &'f self,
        events: &'a [Event],
    ) -> impl Iterator<Item = &'a Event> + use<'a, 'f> {
        events.iter().filter(move |e| self.matches(e))
    }

    /// Returns the events that pass, in input order.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e)).collect()
    }

    fn matches_range(&self, event: &Event) -> bool {
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        let Some(start) = event.start_instant() else {
            return false;
        };
        self.from.is_none_or(|from| start >= from) && self.to.is_none_or(|to| start <= to)
    }

    fn matches_title(&self, event: &Event) -> bool {
        if self.title_keywords.is_empty() {
            return true;
        }
        if self.case_sensitive {
            self.title_keywords
                .iter()
                .any(|k| event.title.contains(k.as_str()))
        } else {
            let title = event.title.to_lowercase();
            self.title_keywords
                .iter()
                .any(|k| title.contains(&k.to_lowercase()))
        }
    }

    fn matches_participants(&self, event: &Event) -> bool {
        self.participants.is_empty()
            || self
                .participants
                .iter()
                .any(|p| event.participants.contains(p))
    }

    fn matches_duration(&self, event: &Event) -> bool {
        if self.min_duration.is_none() && self.max_duration.is_none() {
            return true;
        }
        let Some(duration) = event.duration() else {
            return false;
        };
        self.min_duration.is_none_or(|min| duration >= min)
            && self.max_duration.is_none_or(|max| duration <= max)
    }
}
