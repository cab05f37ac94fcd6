// file: src/utils/mod.rs
// description: shared utility exports

pub mod logging;
pub mod timing;

pub use timing::{OperationTimer, percentile};
