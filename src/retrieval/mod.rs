// file: src/retrieval/mod.rs
// description: retrieval engine exports

pub mod answer;
pub mod engine;
pub mod scorer;
pub mod tokenizer;

pub use answer::{AnswerFormatter, Citation, CompactAnswer};
pub use engine::RetrievalEngine;
pub use scorer::{EntryTokens, FieldWeights};
