//! Per-entity analysis: field classification, documentation scoring and
//! report assembly on top of the [`crate::complexity`] scorers.

pub mod documentation;
pub mod fields;
pub mod report;

pub use fields::{classify, classify_struct, extract_embedded, FieldBreakdown};
pub use report::{analyze_function, analyze_interface, analyze_struct, ReportBuilder};
