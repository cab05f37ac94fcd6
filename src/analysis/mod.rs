// file: src/analysis/mod.rs
// description: numeric impact and tenure analysis exports

pub mod metrics;
pub mod tenure;

pub use metrics::{ImpactReport, TaggedMetric, aggregate_impact};
pub use tenure::{RoleSummary, TenureReport, calculate_tenure, calculate_tenure_now};
