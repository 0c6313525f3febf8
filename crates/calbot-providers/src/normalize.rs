//! EventRecord to Event conversion.
//!
//! Conversion never fails. Missing or malformed fields degrade to their
//! empty form:
//!
//! - `start.dateTime` wins over `start.date`; a `dateTime` that does not
//!   parse leaves the boundary unset rather than falling back to `date`
//! - a missing title becomes the empty string
//! - participants are the organizer plus every attendee with an email

use calbot_core::{Event, EventTime, TimeParser};
use tracing::debug;

use crate::google::{EventDateTime, EventRecord};

/// Converts a single [`EventRecord`] to an [`Event`].
pub fn normalize_record(record: &EventRecord, parser: &TimeParser) -> Event {
    let id = record.id.clone().unwrap_or_default();
    let title = record.summary.clone().unwrap_or_default();

    let mut event = Event::new(id, title).with_recurring(record.is_recurring());
    event.start = record.start.as_ref().and_then(|t| convert_time(t, parser));
    event.end = record.end.as_ref().and_then(|t| convert_time(t, parser));

    let emails = record
        .organizer
        .iter()
        .chain(record.attendees.iter())
        .filter_map(|p| p.email.as_deref())
        .map(str::trim)
        .filter(|e| !e.is_empty());
    for email in emails {
        event = event.with_participant(email);
    }

    if let Some(description) = record.description.as_deref() {
        event = event.with_description(description);
    }

    event
}

/// Converts a list of records, dropping cancelled ones.
pub fn normalize_records(records: &[EventRecord], parser: &TimeParser) -> Vec<Event> {
    let events: Vec<Event> = records
        .iter()
        .filter(|r| !r.is_cancelled())
        .map(|r| normalize_record(r, parser))
        .collect();

    debug!(
        records = records.len(),
        events = events.len(),
        "normalized event records"
    );
    events
}

fn convert_time(raw: &EventDateTime, parser: &TimeParser) -> Option<EventTime> {
    if raw.date_time.is_some() {
        return parser.parse(raw.date_time.as_deref()).map(EventTime::Timed);
    }
    parser.parse_date(raw.date.as_deref()).map(EventTime::AllDay)
}
