//! Events loaded from a Google Calendar JSON export on disk.

use std::path::{Path, PathBuf};

use calbot_core::{Event, TimeParser};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ProviderError, ProviderResult};
use crate::google::{EventListResponse, EventRecord};
use crate::normalize::normalize_records;
use crate::source::{EventSource, FetchOptions};

/// Parses an export: either an `events.list` response object with an
/// `items` list or a bare array of event resources.
pub fn parse_records(content: &str) -> ProviderResult<Vec<EventRecord>> {
    let document: Value = serde_json::from_str(content).map_err(invalid)?;
    match document {
        Value::Array(_) => Vec::<EventRecord>::deserialize(document).map_err(invalid),
        Value::Object(fields) if fields.contains_key("items") => {
            EventListResponse::deserialize(Value::Object(fields))
                .map(|response| response.items)
                .map_err(invalid)
        }
        _ => Err(ProviderError::invalid_response(
            "not a calendar event list: expected an array or an object with \"items\"",
        )),
    }
}

fn invalid(e: serde_json::Error) -> ProviderError {
    ProviderError::invalid_response(format!("not a calendar event list: {e}")).with_source(e)
}

/// Reads events from a JSON file each time they are fetched.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    parser: TimeParser,
}

impl JsonFileSource {
    /// Creates a source reading `path`, interpreting naive timestamps with
    /// `parser`.
    pub fn new(path: impl Into<PathBuf>, parser: TimeParser) -> Self {
        Self {
            path: path.into(),
            parser,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn fetch_events(&self, options: &FetchOptions) -> ProviderResult<Vec<Event>> {
        debug!(path = %self.path.display(), "reading events file");

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            let message = format!("{}: {e}", self.path.display());
            let err = if e.kind() == std::io::ErrorKind::NotFound {
                ProviderError::not_found(message)
            } else {
                ProviderError::io(message)
            };
            err.with_provider(self.name()).with_source(e)
        })?;

        let records = parse_records(&content).map_err(|e| e.with_provider(self.name()))?;
        let events = options.apply(normalize_records(&records, &self.parser));

        info!(
            path = %self.path.display(),
            count = events.len(),
            "loaded events"
        );
        Ok(events)
    }
}
