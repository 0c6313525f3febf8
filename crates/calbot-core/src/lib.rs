//! Core scheduling: time handling, events, conflicts, free slots,
//! categorization and filters

pub mod categorize;
pub mod conflict;
pub mod error;
pub mod event;
pub mod filter;
pub mod optimize;
pub mod slot;
pub mod time;
pub mod tracing;

pub use categorize::{Categories, Categorizer, Category, KeywordRules};
pub use conflict::{Conflict, detect_conflicts};
pub use error::{CoreError, CoreResult};
pub use event::{Event, EventSummary, UNTITLED};
pub use filter::EventFilter;
pub use optimize::{OptimizationReport, ScheduleOptimizer};
pub use slot::{DEFAULT_HORIZON_DAYS, SlotFinder, SlotPolicy};
pub use time::{
    DEFAULT_TIMEZONE, EventTime, Instant, Interval, TimeParser, TimeWindow, parse_time_of_day,
};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
