//! Snapshot diff engine.
//!
//! [`Comparator::compare`] matches the entities of two [`crate::core::Report`]s
//! by key, emits one [`MetricChange`] per changed metric (or per added /
//! removed entity), and sorts the changes into regressions, improvements
//! and neutral changes.

pub mod classifier;
mod comparator;
pub mod delta;
pub mod types;

pub use classifier::Classification;
pub use comparator::{Comparator, DiffError, SnapshotSide};
pub use delta::calculate_delta;
pub use types::{
    ComplexityDiff, Delta, DiffSummary, Direction, Impact, Improvement, ImprovementType,
    Magnitude, MetricChange, Regression, RegressionType, Severity, Trend,
};
