//! Heuristic schedule report built on top of categorization.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::categorize::{Categorizer, Category};
use crate::event::Event;

/// Suggested when there are more than [`WORK_EVENT_THRESHOLD`] work events.
pub const CONSOLIDATE_WORK_SUGGESTION: &str =
    "Consider consolidating work meetings to improve efficiency";

/// Suggested when no personal event is scheduled.
pub const RESERVE_PERSONAL_SUGGESTION: &str = "Consider reserving time for personal events";

/// Work event count above which consolidation is suggested.
pub const WORK_EVENT_THRESHOLD: usize = 3;

/// Counts per bucket and canned suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizationReport {
    pub total_events: usize,
    pub categories: BTreeMap<Category, usize>,
    pub suggestions: Vec<String>,
}

/// Produces an [`OptimizationReport`] for a set of events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleOptimizer {
    categorizer: Categorizer,
}

impl ScheduleOptimizer {
    pub fn new(categorizer: Categorizer) -> Self {
        Self { categorizer }
    }

    pub fn optimize(&self, events: &[Event]) -> OptimizationReport {
        let categories: BTreeMap<Category, usize> = self
            .categorizer
            .categorize(events)
            .into_iter()
            .map(|(category, bucket)| (category, bucket.len()))
            .collect();

        let count = |c: Category| categories.get(&c).copied().unwrap_or(0);
        let mut suggestions = Vec::new();
        if count(Category::Work) > WORK_EVENT_THRESHOLD {
            suggestions.push(CONSOLIDATE_WORK_SUGGESTION.to_string());
        }
        if count(Category::Personal) < 1 {
            suggestions.push(RESERVE_PERSONAL_SUGGESTION.to_string());
        }

        OptimizationReport {
            total_events: events.len(),
            categories,
            suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(titles: &[&str]) -> Vec<Event> {
        titles.iter().map(|t| Event::new(*t, *t)).collect()
    }

    #[test]
    fn empty_schedule_suggests_personal_time() {
        let report = ScheduleOptimizer::default().optimize(&[]);
        assert_eq!(report.total_events, 0);
        assert_eq!(report.categories.len(), 5);
        assert!(report.categories.values().all(|n| *n == 0));
        assert_eq!(report.suggestions, vec![RESERVE_PERSONAL_SUGGESTION]);
    }

    #[test]
    fn three_work_events_is_not_too_many() {
        let events = titled(&["work a", "work b", "work c", "vacaciones"]);
        let report = ScheduleOptimizer::default().optimize(&events);
        assert_eq!(report.categories[&Category::Work], 3);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn busy_work_week() {
        let events = titled(&[
            "Project kickoff",
            "Reunión de trabajo",
            "Work review",
            "Proyecto alpha",
            "Lunch",
        ]);
        let report = ScheduleOptimizer::default().optimize(&events);
        assert_eq!(report.total_events, 5);
        assert_eq!(report.categories[&Category::Work], 4);
        assert_eq!(report.categories[&Category::Meetings], 1);
        assert_eq!(
            report.suggestions,
            vec![CONSOLIDATE_WORK_SUGGESTION, RESERVE_PERSONAL_SUGGESTION]
        );
    }

    #[test]
    fn report_json_shape() {
        let events = titled(&["Personal trainer", "Team meeting"]);
        let report = ScheduleOptimizer::default().optimize(&events);
        insta::assert_json_snapshot!(report, @r#"
        {
          "total_events": 2,
          "categories": {
            "all_day": 0,
            "meetings": 1,
            "personal": 1,
            "work": 0,
            "recurring": 0
          },
          "suggestions": []
        }
        "#);
    }
}
