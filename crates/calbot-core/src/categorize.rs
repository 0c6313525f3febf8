//! Event categorization.
//!
//! Buckets are independent: an event lands in every bucket whose test it
//! passes. `all_day` and `recurring` are structural; the keyword buckets are
//! driven by a [`KeywordRules`] table so they can be localized or extended
//! from configuration.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::Event;

/// The fixed set of event buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Starts on a date with no time of day.
    AllDay,
    /// Title mentions a meeting or call.
    Meetings,
    /// Title mentions personal time.
    Personal,
    /// Title mentions work or a project.
    Work,
    /// Carries a recurrence rule.
    Recurring,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 5] = [
        Self::AllDay,
        Self::Meetings,
        Self::Personal,
        Self::Work,
        Self::Recurring,
    ];

    /// Returns the bucket name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllDay => "all_day",
            Self::Meetings => "meetings",
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Recurring => "recurring",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default keywords for the meetings bucket.
pub const DEFAULT_MEETING_KEYWORDS: &[&str] = &["meeting", "reunión", "call", "llamada"];
/// Default keywords for the personal bucket.
pub const DEFAULT_PERSONAL_KEYWORDS: &[&str] = &["personal", "cumpleaños", "vacaciones"];
/// Default keywords for the work bucket.
pub const DEFAULT_WORK_KEYWORDS: &[&str] = &["trabajo", "work", "project", "proyecto"];

/// A table of `(category, keywords)` rules matched against event titles.
///
/// Keywords are stored lowercased; matching is a case-insensitive substring
/// test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRules {
    rules: Vec<(Category, Vec<String>)>,
}

impl Default for KeywordRules {
    fn default() -> Self {
        Self::empty()
            .with_rule(Category::Meetings, DEFAULT_MEETING_KEYWORDS.iter().copied())
            .with_rule(Category::Personal, DEFAULT_PERSONAL_KEYWORDS.iter().copied())
            .with_rule(Category::Work, DEFAULT_WORK_KEYWORDS.iter().copied())
    }
}

impl KeywordRules {
    /// Creates a table with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Builder method to set the keywords for a category, replacing any
    /// previous rule for it.
    pub fn with_rule<I, S>(mut self, category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self.rules.retain(|(c, _)| *c != category);
        self.rules.push((category, keywords));
        self
    }

    /// Returns the keywords configured for a category.
    pub fn keywords(&self, category: Category) -> &[String] {
        self.rules
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, k)| k.as_slice())
            .unwrap_or(&[])
    }

    /// Returns every category whose keywords appear in `title`.
    pub fn matching(&self, title: &str) -> impl Iterator<Item = Category> + '_ {
        let title = title.to_lowercase();
        self.rules
            .iter()
            .filter(move |(_, keywords)| keywords.iter().any(|k| title.contains(k.as_str())))
            .map(|(category, _)| *category)
    }
}

/// Events grouped by bucket. Every category is present, possibly empty.
pub type Categories<'a> = BTreeMap<Category, Vec<&'a Event>>;

/// Sorts events into buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categorizer {
    rules: KeywordRules,
}

impl Categorizer {
    /// Creates a categorizer with the given keyword table.
    pub fn new(rules: KeywordRules) -> Self {
        Self { rules }
    }

    /// Returns the keyword table.
    pub fn rules(&self) -> &KeywordRules {
        &self.rules
    }

    /// Returns the categories an event belongs to, in report order.
    pub fn categories_of(&self, event: &Event) -> Vec<Category> {
        let mut found = Vec::new();
        if event.is_all_day() {
            found.push(Category::AllDay);
        }
        if event.recurring {
            found.push(Category::Recurring);
        }
        for category in self.rules.matching(&event.title) {
            if !found.contains(&category) {
                found.push(category);
            }
        }
        found.sort();
        found
    }

    /// Groups events by category, keeping input order within each bucket.
    pub fn categorize<'a>(&self, events: &'a [Event]) -> Categories<'a> {
        let mut buckets: Categories<'a> = Category::ALL.iter().map(|c| (*c, Vec::new())).collect();
        for event in events {
            for category in self.categories_of(event) {
                buckets.entry(category).or_default().push(event);
            }
        }
        buckets
    }
}
