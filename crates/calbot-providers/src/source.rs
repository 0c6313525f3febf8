//! EventSource trait definition.
//!
//! A source hands the scheduling components a snapshot of normalized events.
//! Sources are synchronous: every computation downstream is a pure function
//! of the returned list.

use calbot_core::Event;

use crate::error::ProviderResult;

/// Default cap on events returned by a fetch.
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Options for fetching events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Maximum number of events to return; `None` means unlimited.
    pub max_results: Option<usize>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_results: Some(DEFAULT_MAX_RESULTS),
        }
    }
}

impl FetchOptions {
    /// Creates new fetch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set max results.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Builder method to remove the result cap.
    pub fn unlimited(mut self) -> Self {
        self.max_results = None;
        self
    }

    /// Truncates `events` to `max_results`, keeping source order.
    pub fn apply(&self, mut events: Vec<Event>) -> Vec<Event> {
        if let Some(max) = self.max_results {
            events.truncate(max);
        }
        events
    }
}

/// Something that can produce a list of events.
pub trait EventSource {
    /// Returns the name of this source (e.g. "json-file").
    fn name(&self) -> &str;

    /// Loads events, honoring `options`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the underlying data cannot be read or is
    /// not an event list. Individual malformed events are not errors.
    fn fetch_events(&self, options: &FetchOptions) -> ProviderResult<Vec<Event>>;
}

/// A source backed by an in-memory list.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    events: Vec<Event>,
}

impl MemorySource {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }
}

impl EventSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch_events(&self, options: &FetchOptions) -> ProviderResult<Vec<Event>> {
        Ok(options.apply(self.events.clone()))
    }
}
