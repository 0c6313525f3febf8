//! Text and JSON rendering for command results.
//!
//! Text output shows instants in the configured timezone; JSON output keeps
//! the offset each instant was parsed with.

use std::collections::BTreeMap;

use serde::Serialize;

use calbot_core::{
    Categories, Category, Conflict, Event, EventSummary, EventTime, Instant, Interval,
    OptimizationReport, TimeParser,
};

use crate::error::ClientResult;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct ConflictView {
    first: EventSummary,
    second: EventSummary,
    overlap_minutes: Option<i64>,
}

/// Renders command results in one output format.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    parser: TimeParser,
    format: OutputFormat,
}

impl Renderer {
    pub fn new(parser: TimeParser, format: OutputFormat) -> Self {
        Self { parser, format }
    }

    pub fn conflicts(&self, conflicts: &[Conflict<'_>]) -> ClientResult<String> {
        if self.format == OutputFormat::Json {
            let views: Vec<ConflictView> = conflicts
                .iter()
                .map(|c| ConflictView {
                    first: c.first.summary(),
                    second: c.second.summary(),
                    overlap_minutes: c.overlap().map(|d| d.num_minutes()),
                })
                .collect();
            return json(&views);
        }

        if conflicts.is_empty() {
            return Ok("No conflicts found.".to_string());
        }
        let lines: Vec<String> = conflicts
            .iter()
            .map(|c| {
                let mut line = format!(
                    "{} ({}) overlaps {} ({})",
                    c.first.display_title(),
                    self.when(c.first),
                    c.second.display_title(),
                    self.when(c.second)
                );
                if let Some(overlap) = c.overlap() {
                    line.push_str(&format!(" by {} min", overlap.num_minutes()));
                }
                line
            })
            .collect();
        Ok(lines.join("\n"))
    }

    pub fn slot(&self, slot: Option<&Interval>) -> ClientResult<String> {
        if self.format == OutputFormat::Json {
            return json(&slot);
        }
        Ok(match slot {
            Some(slot) => format!("Free slot: {}", self.span(&slot.start, Some(&slot.end))),
            None => "No slot found.".to_string(),
        })
    }

    pub fn categories(&self, categories: &Categories<'_>) -> ClientResult<String> {
        if self.format == OutputFormat::Json {
            let views: BTreeMap<Category, Vec<EventSummary>> = categories
                .iter()
                .map(|(category, events)| (*category, events.iter().map(|e| e.summary()).collect()))
                .collect();
            return json(&views);
        }

        let mut lines = Vec::new();
        for (category, events) in categories {
            lines.push(format!("{}: {}", category, events.len()));
            for event in events {
                lines.push(format!("  - {}", self.line(event)));
            }
        }
        Ok(lines.join("\n"))
    }

    pub fn report(&self, report: &OptimizationReport) -> ClientResult<String> {
        if self.format == OutputFormat::Json {
            return json(report);
        }

        let mut lines = vec![format!("Total events: {}", report.total_events)];
        for (category, count) in &report.categories {
            lines.push(format!("  {}: {}", category, count));
        }
        if report.suggestions.is_empty() {
            lines.push("Suggestions: none".to_string());
        } else {
            lines.push("Suggestions:".to_string());
            for suggestion in &report.suggestions {
                lines.push(format!("  - {}", suggestion));
            }
        }
        Ok(lines.join("\n"))
    }

    pub fn events(&self, events: &[&Event]) -> ClientResult<String> {
        if self.format == OutputFormat::Json {
            let summaries: Vec<EventSummary> = events.iter().map(|e| e.summary()).collect();
            return json(&summaries);
        }

        if events.is_empty() {
            return Ok("No events matched.".to_string());
        }
        let lines: Vec<String> = events.iter().map(|e| format!("- {}", self.line(e))).collect();
        Ok(lines.join("\n"))
    }

    pub fn summaries(&self, events: &[Event]) -> ClientResult<String> {
        if self.format == OutputFormat::Json {
            let summaries: Vec<EventSummary> = events.iter().map(Event::summary).collect();
            return json(&summaries);
        }

        if events.is_empty() {
            return Ok("No events.".to_string());
        }
        let blocks: Vec<String> = events.iter().map(|e| self.summary_block(e)).collect();
        Ok(blocks.join("\n\n"))
    }

    fn summary_block(&self, event: &Event) -> String {
        let summary = event.summary();
        let mut lines = vec![
            summary.title.clone(),
            format!("  id: {}", summary.id),
            format!("  when: {}", self.when(event)),
        ];
        if let Some(minutes) = summary.duration_minutes {
            lines.push(format!("  duration: {} min", minutes));
        }
        if !summary.participants.is_empty() {
            lines.push(format!("  participants: {}", summary.participants.join(", ")));
        }
        if summary.is_recurring {
            lines.push("  recurring: yes".to_string());
        }
        if !summary.description.is_empty() {
            lines.push(format!("  description: {}", summary.description));
        }
        lines.join("\n")
    }

    fn line(&self, event: &Event) -> String {
        format!("{} ({})", event.display_title(), self.when(event))
    }

    fn when(&self, event: &Event) -> String {
        match (&event.start, event.end_instant()) {
            (Some(EventTime::Timed(start)), end) => self.span(start, end.as_ref()),
            (Some(EventTime::AllDay(date)), _) => format!("{} all day", date),
            (None, _) => "no time".to_string(),
        }
    }

    fn span(&self, start: &Instant, end: Option<&Instant>) -> String {
        let tz = self.parser.timezone();
        let start = start.with_timezone(&tz);
        let Some(end) = end.map(|e| e.with_timezone(&tz)) else {
            return start.format("%Y-%m-%d %H:%M").to_string();
        };
        if start.date_naive() == end.date_naive() {
            format!("{}-{}", start.format("%Y-%m-%d %H:%M"), end.format("%H:%M"))
        } else {
            format!(
                "{} to {}",
                start.format("%Y-%m-%d %H:%M"),
                end.format("%Y-%m-%d %H:%M")
            )
        }
    }
}

fn json<T: Serialize + ?Sized>(value: &T) -> ClientResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
