//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/calbot/config.toml` by default. The file is read once at
//! startup and turned into immutable component values; nothing re-reads it
//! while a command runs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use calbot_core::categorize::{
    DEFAULT_MEETING_KEYWORDS, DEFAULT_PERSONAL_KEYWORDS, DEFAULT_WORK_KEYWORDS,
};
use calbot_core::{
    Categorizer, Category, DEFAULT_HORIZON_DAYS, KeywordRules, SlotFinder, SlotPolicy, TimeParser,
    TimeWindow,
};
use calbot_providers::{DEFAULT_MAX_RESULTS, FetchOptions};

use crate::error::{ClientError, ClientResult};

/// Configuration for the calbot client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Calendar data settings.
    pub calendar: CalendarSettings,

    /// Slot search settings.
    pub schedule: ScheduleSettings,

    /// Categorization keywords.
    pub categories: CategorySettings,
}

/// Where events come from and how their timestamps are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// IANA timezone for naive timestamps and day boundaries.
    pub timezone: String,

    /// Exported event list (Google Calendar `events.list` JSON).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_file: Option<PathBuf>,

    /// Maximum number of events loaded.
    pub max_results: usize,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            timezone: calbot_core::DEFAULT_TIMEZONE.name().to_string(),
            events_file: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Work window and horizon for slot search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSettings {
    /// Window start, `HH:MM`.
    pub min_time: String,

    /// Window end, `HH:MM`.
    pub max_time: String,

    /// Number of days searched, starting today.
    pub horizon_days: u32,

    /// Skip free days whose window is shorter than the requested duration.
    pub strict_window: bool,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            min_time: "09:00".to_string(),
            max_time: "17:00".to_string(),
            horizon_days: DEFAULT_HORIZON_DAYS,
            strict_window: false,
        }
    }
}

/// Title keywords per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorySettings {
    pub meetings: Vec<String>,
    pub personal: Vec<String>,
    pub work: Vec<String>,
}

impl Default for CategorySettings {
    fn default() -> Self {
        fn owned(keywords: &[&str]) -> Vec<String> {
            keywords.iter().map(|k| k.to_string()).collect()
        }
        Self {
            meetings: owned(DEFAULT_MEETING_KEYWORDS),
            personal: owned(DEFAULT_PERSONAL_KEYWORDS),
            work: owned(DEFAULT_WORK_KEYWORDS),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if the file
    /// does not exist.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            ClientError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calbot")
    }

    pub fn time_parser(&self) -> ClientResult<TimeParser> {
        Ok(TimeParser::from_name(&self.calendar.timezone)?)
    }

    pub fn time_window(&self) -> ClientResult<TimeWindow> {
        Ok(TimeWindow::parse(
            &self.schedule.min_time,
            &self.schedule.max_time,
        )?)
    }

    pub fn slot_policy(&self) -> SlotPolicy {
        if self.schedule.strict_window {
            SlotPolicy::Strict
        } else {
            SlotPolicy::Legacy
        }
    }

    pub fn slot_finder(&self) -> ClientResult<SlotFinder> {
        Ok(SlotFinder::new(self.time_parser()?).with_policy(self.slot_policy()))
    }

    pub fn categorizer(&self) -> Categorizer {
        let rules = KeywordRules::empty()
            .with_rule(Category::Meetings, &self.categories.meetings)
            .with_rule(Category::Personal, &self.categories.personal)
            .with_rule(Category::Work, &self.categories.work);
        Categorizer::new(rules)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::new().with_max_results(self.calendar.max_results)
    }

    /// Checks that every setting can be turned into a component.
    pub fn validate(&self) -> ClientResult<()> {
        self.time_parser()?;
        self.time_window()?;
        if self.schedule.horizon_days == 0 {
            return Err(ClientError::Config(
                "schedule.horizon_days must be at least 1".to_string(),
            ));
        }
        if self.calendar.max_results == 0 {
            return Err(ClientError::Config(
                "calendar.max_results must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.calendar.timezone, "America/Santiago");
        assert_eq!(config.calendar.max_results, 100);
        assert_eq!(config.schedule.horizon_days, 7);
        assert_eq!(config.slot_policy(), SlotPolicy::Legacy);
        assert_eq!(config.time_window().unwrap(), TimeWindow::default());
        assert_eq!(config.categorizer(), Categorizer::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
[calendar]
timezone = "Europe/Paris"
events_file = "/tmp/events.json"

[schedule]
min_time = "10:00"
strict_window = true

[categories]
work = ["Standup"]
"#,
        )
        .unwrap();

        assert_eq!(
            config.time_parser().unwrap(),
            TimeParser::from_name("Europe/Paris").unwrap()
        );
        assert_eq!(
            config.calendar.events_file.as_deref(),
            Some(Path::new("/tmp/events.json"))
        );
        assert_eq!(config.calendar.max_results, 100);
        assert_eq!(config.schedule.max_time, "17:00");
        assert_eq!(config.slot_finder().unwrap().policy(), SlotPolicy::Strict);

        let categorizer = config.categorizer();
        assert_eq!(categorizer.rules().keywords(Category::Work), ["standup"]);
        assert_eq!(categorizer.rules().keywords(Category::Meetings).len(), 4);
    }

    #[test]
    fn invalid_values_fail_validation() {
        let mut config = ClientConfig::default();
        config.calendar.timezone = "Mars/Olympus".into();
        assert!(matches!(config.validate(), Err(ClientError::Core(_))));

        let mut config = ClientConfig::default();
        config.schedule.min_time = "18:00".into();
        assert!(matches!(config.validate(), Err(ClientError::Core(_))));

        let mut config = ClientConfig::default();
        config.schedule.horizon_days = 0;
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[schedule]\nhorizon_days = 3").unwrap();
        let config = ClientConfig::load_from(file.path()).unwrap();
        assert_eq!(config.schedule.horizon_days, 3);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[schedule\nhorizon_days = ").unwrap();
        let err = ClientConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn dump_round_trips() {
        let config = ClientConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: ClientConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
