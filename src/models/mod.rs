// file: src/models/mod.rs
// description: data model exports

pub mod entry;
pub mod scored_result;

pub use entry::{Category, DateRange, Entry, MetricUnit, MetricValue};
pub use scored_result::{MatchBreakdown, ScoredResult};
