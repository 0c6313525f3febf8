//! Scheduling commands: conflicts, slot, categorize, optimize, filter, show.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use calbot_core::{
    EventFilter, ScheduleOptimizer, SlotPolicy, TimeParser, TimeWindow, detect_conflicts,
};

use super::Session;
use crate::cli::{FilterArgs, SlotArgs};
use crate::error::{ClientError, ClientResult};

pub fn conflicts(session: &Session) -> ClientResult<String> {
    let events = session.events()?;
    let conflicts = detect_conflicts(&events);
    info!(count = conflicts.len(), "conflicts detected");
    session.renderer().conflicts(&conflicts)
}

pub fn slot(session: &Session, args: &SlotArgs) -> ClientResult<String> {
    slot_at(session, args, Utc::now())
}

/// Like [`slot`], searching from the day containing `now`.
pub fn slot_at(session: &Session, args: &SlotArgs, now: DateTime<Utc>) -> ClientResult<String> {
    let schedule = &session.config().schedule;
    let window = TimeWindow::parse(
        args.min_time.as_deref().unwrap_or(&schedule.min_time),
        args.max_time.as_deref().unwrap_or(&schedule.max_time),
    )?;
    let mut finder = session.config().slot_finder()?;
    if args.strict {
        finder = finder.with_policy(SlotPolicy::Strict);
    }
    let days = args.days.unwrap_or(schedule.horizon_days);

    let duration = minutes("--duration", args.duration)?;

    let events = session.events()?;
    let slot = finder.find_slot_at(now, &events, duration, days, window)?;
    info!(found = slot.is_some(), "slot search finished");
    session.renderer().slot(slot.as_ref())
}

pub fn categorize(session: &Session) -> ClientResult<String> {
    let events = session.events()?;
    let categories = session.config().categorizer().categorize(&events);
    session.renderer().categories(&categories)
}

pub fn optimize(session: &Session) -> ClientResult<String> {
    let events = session.events()?;
    let report = ScheduleOptimizer::new(session.config().categorizer()).optimize(&events);
    session.renderer().report(&report)
}

pub fn filter(session: &Session, args: &FilterArgs) -> ClientResult<String> {
    let filter = build_filter(session.parser(), args)?;
    let events = session.events()?;
    let selected = filter.apply(&events);
    debug!(
        total = events.len(),
        selected = selected.len(),
        "filtered events"
    );
    session.renderer().events(&selected)
}

pub fn show(session: &Session) -> ClientResult<String> {
    let events = session.events()?;
    session.renderer().summaries(&events)
}

/// Turns command-line criteria into an [`EventFilter`].
pub fn build_filter(parser: &TimeParser, args: &FilterArgs) -> ClientResult<EventFilter> {
    let timestamp = |flag: &str, raw: &str| {
        parser
            .parse(Some(raw))
            .ok_or_else(|| ClientError::Argument(format!("{flag}: cannot parse '{raw}'")))
    };

    let mut filter = EventFilter::new().case_sensitive(args.case_sensitive);
    if let Some(ref from) = args.from {
        filter = filter.from(timestamp("--from", from)?);
    }
    if let Some(ref to) = args.to {
        filter = filter.to(timestamp("--to", to)?);
    }
    for title in &args.title {
        filter = filter.title(title);
    }
    for participant in &args.participant {
        filter = filter.participant(participant);
    }
    if let Some(min) = args.min_duration {
        filter = filter.min_duration(minutes("--min-duration", min)?);
    }
    if let Some(max) = args.max_duration {
        filter = filter.max_duration(minutes("--max-duration", max)?);
    }
    Ok(filter)
}

fn minutes(flag: &str, value: i64) -> ClientResult<Duration> {
    Duration::try_minutes(value).ok_or_else(|| {
        ClientError::Argument(format!("{flag}: {value} minutes is out of range"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use calbot_core::{Event, EventTime};
    use calbot_providers::MemorySource;
    use chrono::{NaiveDate, TimeZone};

    use crate::config::ClientConfig;
    use crate::output::OutputFormat;

    fn parser() -> TimeParser {
        TimeParser::from_name("America/Santiago").unwrap()
    }

    fn timed(id: &str, title: &str, start: &str, end: &str) -> Event {
        let p = parser();
        Event::new(id, title).with_times(
            p.parse(Some(start)).unwrap(),
            p.parse(Some(end)).unwrap(),
        )
    }

    fn week() -> Vec<Event> {
        vec![
            timed("a", "Daily standup", "2025-03-10T09:00:00", "2025-03-10T09:30:00")
                .with_participant("ana@example.com"),
            timed("b", "Client call", "2025-03-10T09:15:00", "2025-03-10T10:00:00")
                .with_participant("bo@example.com"),
            timed("c", "Project planning", "2025-03-11T14:00:00", "2025-03-11T16:00:00"),
            Event::new("d", "Cumpleaños Ana")
                .with_start(EventTime::AllDay(NaiveDate::from_ymd_opt(2025, 3, 12).unwrap())),
        ]
    }

    fn session(config: ClientConfig) -> Session {
        Session::with_source(config, OutputFormat::Text, Box::new(MemorySource::new(week())))
            .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn slot_args(duration: i64) -> SlotArgs {
        SlotArgs {
            duration,
            days: None,
            min_time: None,
            max_time: None,
            strict: false,
        }
    }

    #[test]
    fn conflicts_command() {
        let out = conflicts(&session(ClientConfig::default())).unwrap();
        insta::assert_snapshot!(out, @"Daily standup (2025-03-10 09:00-09:30) overlaps Client call (2025-03-10 09:15-10:00) by 15 min");
    }

    #[test]
    fn slot_after_last_event_of_the_day() {
        // Today's bookings leave no hour between them and the 10:00 end is
        // not the last booking overall. Tomorrow's morning is never tried
        // because the planning session is not the first booking overall.
        let out = slot_at(&session(ClientConfig::default()), &slot_args(60), now()).unwrap();
        assert_eq!(out, "Free slot: 2025-03-11 16:00-17:00");
    }

    #[test]
    fn slot_overrides() {
        let args = SlotArgs {
            min_time: Some("10:00".into()),
            max_time: Some("12:00".into()),
            days: Some(1),
            ..slot_args(120)
        };
        let out = slot_at(&session(ClientConfig::default()), &args, now()).unwrap();
        assert_eq!(out, "No slot found.");

        let err = slot_at(&session(ClientConfig::default()), &slot_args(0), now()).unwrap_err();
        assert!(matches!(err, ClientError::Core(_)));
    }

    #[test]
    fn slot_with_enormous_duration() {
        let session = session(ClientConfig::default());
        let err = slot_at(&session, &slot_args(i64::MAX), now()).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("invalid argument: --duration: {} minutes is out of range", i64::MAX)
        );

        // Representable, but no calendar day can hold it.
        let out = slot_at(&session, &slot_args(144_000_000_000), now()).unwrap();
        assert_eq!(out, "No slot found.");
    }

    #[test]
    fn strict_flag_applies_to_free_days() {
        let mut config = ClientConfig::default();
        config.schedule.horizon_days = 3;
        let session = Session::with_source(
            config,
            OutputFormat::Text,
            Box::new(MemorySource::default()),
        )
        .unwrap();

        let legacy = slot_at(&session, &slot_args(600), now()).unwrap();
        assert_eq!(legacy, "Free slot: 2025-03-10 09:00-19:00");

        let args = SlotArgs {
            strict: true,
            ..slot_args(600)
        };
        assert_eq!(slot_at(&session, &args, now()).unwrap(), "No slot found.");
    }

    #[test]
    fn categorize_uses_configured_keywords() {
        let mut config = ClientConfig::default();
        config.categories.work = vec!["standup".into()];
        let out = categorize(&session(config)).unwrap();
        insta::assert_snapshot!(out, @r"
        all_day: 1
          - Cumpleaños Ana (2025-03-12 all day)
        meetings: 1
          - Client call (2025-03-10 09:15-10:00)
        personal: 1
          - Cumpleaños Ana (2025-03-12 all day)
        work: 1
          - Daily standup (2025-03-10 09:00-09:30)
        recurring: 0
        ");
    }

    #[test]
    fn optimize_command() {
        let out = optimize(&session(ClientConfig::default())).unwrap();
        insta::assert_snapshot!(out, @r"
        Total events: 4
          all_day: 1
          meetings: 1
          personal: 1
          work: 1
          recurring: 0
        Suggestions: none
        ");
    }

    #[test]
    fn filter_command() {
        let args = FilterArgs {
            from: Some("2025-03-10".into()),
            to: Some("2025-03-10T23:59:00".into()),
            min_duration: Some(30),
            ..Default::default()
        };
        let out = filter(&session(ClientConfig::default()), &args).unwrap();
        insta::assert_snapshot!(out, @r"
        - Daily standup (2025-03-10 09:00-09:30)
        - Client call (2025-03-10 09:15-10:00)
        ");

        let args = FilterArgs {
            participant: vec!["bo@example.com".into()],
            title: vec!["CALL".into()],
            ..Default::default()
        };
        let out = filter(&session(ClientConfig::default()), &args).unwrap();
        assert_eq!(out, "- Client call (2025-03-10 09:15-10:00)");
    }

    #[test]
    fn filter_rejects_bad_timestamp() {
        let args = FilterArgs {
            from: Some("next tuesday".into()),
            ..Default::default()
        };
        let err = build_filter(&parser(), &args).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument: --from: cannot parse 'next tuesday'"
        );

        let args = FilterArgs {
            max_duration: Some(i64::MIN),
            ..Default::default()
        };
        assert!(matches!(
            build_filter(&parser(), &args),
            Err(ClientError::Argument(_))
        ));
    }

    #[test]
    fn show_command() {
        let out = show(&session(ClientConfig::default())).unwrap();
        insta::assert_snapshot!(out, @r"
        Daily standup
          id: a
          when: 2025-03-10 09:00-09:30
          duration: 30 min
          participants: ana@example.com

        Client call
          id: b
          when: 2025-03-10 09:15-10:00
          duration: 45 min
          participants: bo@example.com

        Project planning
          id: c
          when: 2025-03-11 14:00-16:00
          duration: 120 min

        Cumpleaños Ana
          id: d
          when: 2025-03-12 all day
        ");
    }
}
