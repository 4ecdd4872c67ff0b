// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod comparison;
pub mod complexity;
pub mod config;
pub mod core;
pub mod io;
pub mod observability;

// Re-export commonly used types
pub use crate::core::errors::{Error, Result, ResultExt};
pub use crate::core::{
    ComplexityScore, ComplexitySummary, DocumentationInfo, EmbeddedType, FieldType,
    FunctionMetrics, InterfaceMetrics, PackageMetrics, Report, ReportSnapshot,
    SignatureComplexity, StructMetrics,
};

pub use crate::analysis::{classify, classify_struct, extract_embedded, ReportBuilder};
pub use crate::complexity::EntityScorer;

pub use crate::comparison::{
    calculate_delta, ComplexityDiff, Comparator, DiffError, DiffSummary, Improvement,
    MetricChange, Regression,
};

pub use crate::config::{CodegaugeConfig, ConfigError, PresetLevel, ThresholdConfig};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
