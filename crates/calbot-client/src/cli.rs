//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// calbot - conflicts, free slots and categories for your calendar
#[derive(Debug, Parser)]
#[command(name = "calbot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CALBOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Event list to read (overrides calendar.events_file)
    #[arg(long, short, env = "CALBOT_EVENTS", global = true)]
    pub events: Option<PathBuf>,

    /// IANA timezone (overrides calendar.timezone)
    #[arg(long, global = true)]
    pub timezone: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List overlapping event pairs
    Conflicts,

    /// Find the first free slot
    Slot(SlotArgs),

    /// Group events by category
    Categorize,

    /// Category counts and suggestions
    Optimize,

    /// Select events matching criteria
    Filter(FilterArgs),

    /// Per-event summary
    Show,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options for `slot`.
#[derive(Debug, Clone, Args)]
pub struct SlotArgs {
    /// Slot length in minutes
    #[arg(long, short)]
    pub duration: i64,

    /// Number of days to search (overrides schedule.horizon_days)
    #[arg(long)]
    pub days: Option<u32>,

    /// Window start, HH:MM (overrides schedule.min_time)
    #[arg(long)]
    pub min_time: Option<String>,

    /// Window end, HH:MM (overrides schedule.max_time)
    #[arg(long)]
    pub max_time: Option<String>,

    /// Do not let a slot on a free day run past the window end
    #[arg(long)]
    pub strict: bool,
}

/// Options for `filter`.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Earliest start (timestamp or YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest start (timestamp or YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Title keyword (can be repeated)
    #[arg(long, action = clap::ArgAction::Append)]
    pub title: Vec<String>,

    /// Match title keywords respecting case
    #[arg(long)]
    pub case_sensitive: bool,

    /// Participant email (can be repeated)
    #[arg(long, action = clap::ArgAction::Append)]
    pub participant: Vec<String>,

    /// Minimum duration in minutes
    #[arg(long)]
    pub min_duration: Option<i64>,

    /// Maximum duration in minutes
    #[arg(long)]
    pub max_duration: Option<i64>,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_slot() {
        let cli = Cli::try_parse_from([
            "calbot", "--json", "slot", "--duration", "45", "--days", "3", "--strict",
        ])
        .unwrap();
        assert!(cli.json);
        let Command::Slot(args) = cli.command else {
            panic!("expected slot command");
        };
        assert_eq!(args.duration, 45);
        assert_eq!(args.days, Some(3));
        assert!(args.strict);
        assert_eq!(args.min_time, None);
    }

    #[test]
    fn parses_repeated_filter_flags() {
        let cli = Cli::try_parse_from([
            "calbot",
            "filter",
            "--title",
            "standup",
            "--title",
            "review",
            "--participant",
            "ana@example.com",
            "--events",
            "events.json",
        ])
        .unwrap();
        assert_eq!(cli.events, Some(PathBuf::from("events.json")));
        let Command::Filter(args) = cli.command else {
            panic!("expected filter command");
        };
        assert_eq!(args.title, ["standup", "review"]);
        assert_eq!(args.participant, ["ana@example.com"]);
    }

    #[test]
    fn slot_requires_duration() {
        assert!(Cli::try_parse_from(["calbot", "slot"]).is_err());
    }
}
