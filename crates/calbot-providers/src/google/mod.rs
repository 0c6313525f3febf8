//! Google Calendar event resources.
//!
//! Only the wire format is handled here; events arrive as exported
//! `events.list` JSON and go through [`crate::normalize`].

mod record;

pub use record::{EventDateTime, EventListResponse, EventRecord, Person};
