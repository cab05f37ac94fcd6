// file: src/eval/mod.rs
// description: retrieval quality evaluation harness

pub mod cases;
pub mod runner;

pub use cases::{builtin_cases, load_cases, EvalCase};
pub use runner::{save_results, EvalRunner, EvalSummary};
