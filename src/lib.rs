// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod analysis;
pub mod config;
pub mod error;
pub mod eval;
pub mod mcp;
pub mod models;
pub mod ops;
pub mod redaction;
pub mod retrieval;
pub mod store;
pub mod utils;

pub use analysis::{
    aggregate_impact, calculate_tenure, calculate_tenure_now, ImpactReport, TenureReport,
};
pub use config::{Config, CorpusConfig, EvalConfig, RedactionConfig, RetrievalConfig};
pub use error::{ResumeError, Result};
pub use eval::{builtin_cases, EvalCase, EvalRunner, EvalSummary};
pub use mcp::ResumeQueryServer;
pub use models::{Category, DateRange, Entry, MetricUnit, MetricValue, ScoredResult};
pub use ops::{OpArgs, OpContext, OpRegistry};
pub use redaction::{PiiFinding, PiiScanner};
pub use retrieval::{AnswerFormatter, CompactAnswer, RetrievalEngine};
pub use store::{Corpus, CorpusLoader};
pub use utils::OperationTimer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _loader = CorpusLoader::new();
    }
}
