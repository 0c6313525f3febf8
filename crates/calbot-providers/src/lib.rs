//! EventSource trait and event loaders.
//!
//! - [`EventSource`] - the trait every event backend implements
//! - [`EventRecord`] - Google Calendar API event resource
//! - [`normalize_record`] - converts a record to a [`calbot_core::Event`]
//! - [`JsonFileSource`] - reads an exported event list from disk
//!
//! ```text
//!   events.json ──► JsonFileSource ──► EventRecord ──► normalize_record() ──► Event
//! ```

pub mod error;
pub mod file;
pub mod google;
pub mod normalize;
pub mod source;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use file::{JsonFileSource, parse_records};
pub use google::{EventDateTime, EventListResponse, EventRecord, Person};
pub use normalize::{normalize_record, normalize_records};
pub use source::{DEFAULT_MAX_RESULTS, EventSource, FetchOptions, MemorySource};
