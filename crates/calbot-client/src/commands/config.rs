//! Configuration commands.

use std::path::Path;

use crate::cli::ConfigAction;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

pub fn run(action: ConfigAction, config: &ClientConfig, path: &Path) -> ClientResult<String> {
    match action {
        ConfigAction::Dump => dump(config, path),
        ConfigAction::Validate => {
            validate(config)?;
            Ok("Configuration is valid.".to_string())
        }
        ConfigAction::Path => Ok(format!("config: {}", path.display())),
    }
}

/// Renders the effective configuration as TOML.
pub fn dump(config: &ClientConfig, path: &Path) -> ClientResult<String> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    Ok(format!("# config.toml ({})\n{}", path.display(), toml_str.trim_end()))
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    config.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_default() {
        let config = ClientConfig::default();
        let out = dump(&config, Path::new("/etc/calbot/config.toml")).unwrap();

        let (header, body) = out.split_once('\n').unwrap();
        assert_eq!(header, "# config.toml (/etc/calbot/config.toml)");
        assert!(body.contains("timezone = \"America/Santiago\""));
        assert!(body.contains("[categories]"));
        assert!(!body.contains("events_file"));

        let parsed: ClientConfig = toml::from_str(body).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn validate_ok() {
        let out = run(ConfigAction::Validate, &ClientConfig::default(), Path::new("c.toml")).unwrap();
        assert_eq!(out, "Configuration is valid.");
    }

    #[test]
    fn validate_reports_bad_window() {
        let mut config = ClientConfig::default();
        config.schedule.max_time = "25:00".into();
        assert!(run(ConfigAction::Validate, &config, Path::new("c.toml")).is_err());
    }

    #[test]
    fn path() {
        let out = run(
            ConfigAction::Path,
            &ClientConfig::default(),
            Path::new("/home/u/.config/calbot/config.toml"),
        )
        .unwrap();
        assert_eq!(out, "config: /home/u/.config/calbot/config.toml");
    }
}
