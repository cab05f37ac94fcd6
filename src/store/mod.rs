// file: src/store/mod.rs
// description: document store exports

pub mod corpus;
pub mod loader;

pub use corpus::Corpus;
pub use loader::CorpusLoader;
