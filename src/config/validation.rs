//! Threshold validation.
//!
//! Every rule is checked so a single run reports all problems in a file.

use std::fmt;
use thiserror::Error;

use super::thresholds::ThresholdConfig;

/// A single rejected value with the dotted path of the offending field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Failed to parse {source_name}: {message}")]
    Parse { source_name: String, message: String },

    #[error("Invalid configuration: {}", join_issues(.issues))]
    Invalid { issues: Vec<FieldIssue> },
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn validate_thresholds(config: &ThresholdConfig) -> Result<(), ConfigError> {
    let mut issues = Vec::new();
    let mut reject = |field: &str, message: String| {
        issues.push(FieldIssue {
            field: field.to_string(),
            message,
        })
    };

    let significance = config.global.significance_level;
    if !(0.0..=100.0).contains(&significance) {
        reject(
            "global.significance_level",
            format!("expected 0-100, got {significance}"),
        );
    }

    let function = &config.function_complexity;
    if function.warning > function.error {
        reject(
            "function_complexity.warning",
            format!(
                "warning ({}) must not exceed error ({})",
                function.warning, function.error
            ),
        );
    }

    let coupling = config.package_metrics.max_coupling;
    if !coupling.is_finite() || coupling < 0.0 {
        reject(
            "package_metrics.max_coupling",
            format!("expected a non-negative number, got {coupling}"),
        );
    }

    let cohesion = config.package_metrics.min_cohesion;
    if !(0.0..=1.0).contains(&cohesion) {
        reject(
            "package_metrics.min_cohesion",
            format!("expected 0.0-1.0, got {cohesion}"),
        );
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Invalid { issues })
    }
}
