// file: src/redaction/mod.rs
// description: offline PII redaction check exports

pub mod patterns;
pub mod scanner;

pub use scanner::{PiiFinding, PiiKind, PiiScanner, Severity};
