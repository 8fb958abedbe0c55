//! Turning raw log lines into structured records

pub mod parser;
pub mod record;

pub use parser::{parse_record, split_directive, LineClassifier};
pub use record::{Classification, ClassifiedRecord, Directive, Severity};
