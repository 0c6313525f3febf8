//! Command implementations.
//!
//! Every command returns its rendered output; `main` prints it.

pub mod config;
pub mod schedule;

use std::path::Path;

use calbot_core::{Event, TimeParser};
use calbot_providers::{EventSource, JsonFileSource};

use crate::cli::Command;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::output::{OutputFormat, Renderer};

/// Components built once from configuration and shared by a command.
pub struct Session {
    config: ClientConfig,
    parser: TimeParser,
    renderer: Renderer,
    source: Box<dyn EventSource>,
}

impl Session {
    /// Builds a session reading events from the configured events file.
    pub fn new(config: ClientConfig, format: OutputFormat) -> ClientResult<Self> {
        let path = config.calendar.events_file.clone().ok_or_else(|| {
            ClientError::Config(
                "no events file configured; pass --events or set calendar.events_file"
                    .to_string(),
            )
        })?;
        let source = JsonFileSource::new(path, config.time_parser()?);
        Self::with_source(config, format, Box::new(source))
    }

    /// Builds a session over an arbitrary event source.
    pub fn with_source(
        config: ClientConfig,
        format: OutputFormat,
        source: Box<dyn EventSource>,
    ) -> ClientResult<Self> {
        config.validate()?;
        let parser = config.time_parser()?;
        Ok(Self {
            config,
            parser,
            renderer: Renderer::new(parser, format),
            source,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn parser(&self) -> &TimeParser {
        &self.parser
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Fetches a fresh snapshot of events.
    pub fn events(&self) -> ClientResult<Vec<Event>> {
        Ok(self.source.fetch_events(&self.config.fetch_options())?)
    }
}

/// Runs a command and returns what it printed.
pub fn dispatch(
    command: Command,
    config: ClientConfig,
    config_path: &Path,
    format: OutputFormat,
) -> ClientResult<String> {
    match command {
        Command::Config { action } => config::run(action, &config, config_path),
        Command::Conflicts => schedule::conflicts(&Session::new(config, format)?),
        Command::Slot(args) => schedule::slot(&Session::new(config, format)?, &args),
        Command::Categorize => schedule::categorize(&Session::new(config, format)?),
        Command::Optimize => schedule::optimize(&Session::new(config, format)?),
        Command::Filter(args) => schedule::filter(&Session::new(config, format)?, &args),
        Command::Show => schedule::show(&Session::new(config, format)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn session_without_events_file_is_a_config_error() {
        let err = Session::new(ClientConfig::default(), OutputFormat::Text)
            .err()
            .unwrap();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn dispatch_reads_events_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"items": [
                {{"id": "a", "summary": "Sync", "start": {{"dateTime": "2025-03-10T10:00:00"}}, "end": {{"dateTime": "2025-03-10T11:00:00"}}}},
                {{"id": "b", "summary": "Call", "start": {{"dateTime": "2025-03-10T10:30:00"}}, "end": {{"dateTime": "2025-03-10T11:30:00"}}}}
            ]}}"#
        )
        .unwrap();

        let mut config = ClientConfig::default();
        config.calendar.events_file = Some(file.path().to_path_buf());

        let out = dispatch(
            Command::Conflicts,
            config,
            Path::new("config.toml"),
            OutputFormat::Text,
        )
        .unwrap();
        assert_eq!(
            out,
            "Sync (2025-03-10 10:00-11:00) overlaps Call (2025-03-10 10:30-11:30) by 30 min"
        );
    }

    #[test]
    fn missing_events_file_is_a_provider_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ClientConfig::default();
        config.calendar.events_file = Some(dir.path().join("missing.json"));

        let err = dispatch(
            Command::Show,
            config,
            Path::new("config.toml"),
            OutputFormat::Text,
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Provider(_)));
    }
}
