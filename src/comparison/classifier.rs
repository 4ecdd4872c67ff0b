//! Severity assignment, classification, priority and summary for metric changes.

use super::types::{
    Delta, DiffSummary, Direction, Impact, Improvement, ImprovementType, Magnitude, MetricChange,
    Regression, RegressionType, Severity, Trend,
};
use crate::config::ThresholdConfig;

pub const FUNCTION_COMPLEXITY: &str = "function_complexity";
pub const FUNCTION_COGNITIVE: &str = "function_cognitive_complexity";
pub const FUNCTION_NESTING: &str = "function_nesting_complexity";
pub const FUNCTION_SIGNATURE: &str = "function_signature_complexity";
pub const STRUCT_FIELDS: &str = "struct_fields";
pub const STRUCT_COMPLEXITY: &str = "struct_complexity";
pub const PACKAGE_COUPLING: &str = "package_coupling";
pub const PACKAGE_COHESION: &str = "package_cohesion";
pub const PACKAGE_SIZE: &str = "package_size";
pub const OVERALL_COMPLEXITY: &str = "overall_complexity";
pub const CODEBASE_SIZE: &str = "codebase_size";

/// What a single change means for code quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Regression,
    Improvement,
    Neutral,
}

/// Magnitude-only mapping used when no category threshold applies.
pub fn generic_assessment(magnitude: Magnitude) -> (Impact, Severity) {
    match magnitude {
        Magnitude::Critical => (Impact::Critical, Severity::Critical),
        Magnitude::Major => (Impact::High, Severity::Error),
        Magnitude::Significant => (Impact::Medium, Severity::Warning),
        Magnitude::Moderate | Magnitude::Minor => (Impact::Low, Severity::Info),
    }
}

/// Impact and severity for a metric present in both snapshots.
///
/// Category thresholds take precedence over the generic magnitude table.
pub fn assess(category: &str, new: f64, delta: &Delta, config: &ThresholdConfig) -> (Impact, Severity) {
    let function = &config.function_complexity;
    let structs = &config.struct_complexity;
    let packages = &config.package_metrics;

    match category {
        FUNCTION_COMPLEXITY if new > f64::from(function.error) => (Impact::Critical, Severity::Critical),
        FUNCTION_COMPLEXITY if new > f64::from(function.warning) => (Impact::High, Severity::Warning),
        FUNCTION_COMPLEXITY if delta.absolute > f64::from(function.max_increase) => {
            (Impact::Medium, Severity::Warning)
        }
        STRUCT_FIELDS if new > f64::from(structs.max_fields) => (Impact::High, Severity::Error),
        STRUCT_FIELDS if delta.absolute > f64::from(structs.field_increase) => {
            (Impact::Medium, Severity::Warning)
        }
        PACKAGE_COUPLING if new > packages.max_coupling => (Impact::High, Severity::Error),
        PACKAGE_COHESION if new < packages.min_cohesion => (Impact::High, Severity::Error),
        _ => generic_assessment(delta.magnitude),
    }
}

/// Regression and improvement predicates are exclusive by direction.
pub fn classify(change: &MetricChange) -> Classification {
    let delta = &change.delta;
    match delta.direction {
        Direction::Increase if delta.significant && change.severity >= Severity::Warning => {
            Classification::Regression
        }
        Direction::Decrease if delta.significant => Classification::Improvement,
        _ => Classification::Neutral,
    }
}

pub fn regression_type(category: &str) -> RegressionType {
    if category.contains("complexity") {
        RegressionType::ComplexityRegression
    } else if category.contains("coupling") {
        RegressionType::CouplingRegression
    } else if category.contains("cohesion") {
        RegressionType::CohesionRegression
    } else if category.contains("size") || category.contains("field") {
        RegressionType::SizeRegression
    } else if category.contains("documentation") {
        RegressionType::DocumentationRegression
    } else {
        RegressionType::ComplexityRegression
    }
}

pub fn improvement_type(category: &str) -> ImprovementType {
    match regression_type(category) {
        RegressionType::ComplexityRegression => ImprovementType::ComplexityImprovement,
        RegressionType::CouplingRegression => ImprovementType::CouplingImprovement,
        RegressionType::CohesionRegression => ImprovementType::CohesionImprovement,
        RegressionType::SizeRegression => ImprovementType::SizeImprovement,
        RegressionType::DocumentationRegression => ImprovementType::DocumentationImprovement,
    }
}

/// `1 + severity weight + magnitude weight`, capped at 10.
pub fn priority(severity: Severity, magnitude: Magnitude) -> u8 {
    let severity_weight = match severity {
        Severity::Critical => 8,
        Severity::Error => 6,
        Severity::Warning => 4,
        Severity::Info => 2,
    };
    let magnitude_weight = match magnitude {
        Magnitude::Critical => 4,
        Magnitude::Major => 3,
        Magnitude::Significant => 2,
        Magnitude::Moderate => 1,
        Magnitude::Minor => 0,
    };
    (1 + severity_weight + magnitude_weight).min(10)
}

pub fn benefit(magnitude: Magnitude) -> &'static str {
    match magnitude {
        Magnitude::Critical => "major improvement",
        Magnitude::Major => "significant improvement",
        Magnitude::Significant => "notable improvement",
        Magnitude::Moderate => "moderate improvement",
        Magnitude::Minor => "minor improvement",
    }
}

pub fn to_regression(change: &MetricChange) -> Regression {
    Regression {
        regression_type: regression_type(&change.category),
        priority: priority(change.severity, change.delta.magnitude),
        change: change.clone(),
    }
}

pub fn to_improvement(change: &MetricChange) -> Improvement {
    Improvement {
        improvement_type: improvement_type(&change.category),
        benefit: benefit(change.delta.magnitude).to_string(),
        change: change.clone(),
    }
}

pub fn summarize(
    changes: &[MetricChange],
    regressions: &[Regression],
    improvements: &[Improvement],
) -> DiffSummary {
    let total_changes = changes.len();
    let regression_count = regressions.len();
    let improvement_count = improvements.len();
    let significant_changes = changes.iter().filter(|c| c.delta.significant).count();
    let critical_issues = regressions
        .iter()
        .filter(|r| r.change.severity == Severity::Critical)
        .count();

    let overall_trend = if regression_count > improvement_count {
        Trend::Degrading
    } else if improvement_count > regression_count {
        Trend::Improving
    } else {
        Trend::Stable
    };

    let quality_score = if significant_changes == 0 {
        100.0
    } else {
        improvement_count as f64 / significant_changes as f64 * 100.0
    };

    DiffSummary {
        total_changes,
        regression_count,
        improvement_count,
        neutral_change_count: total_changes - regression_count - improvement_count,
        significant_changes,
        critical_issues,
        overall_trend,
        quality_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::delta::calculate_delta;
    use std::path::PathBuf;

    fn change(category: &str, old: f64, new: f64, config: &ThresholdConfig) -> MetricChange {
        let delta = calculate_delta(old, new, config.global.significance_level);
        let (impact, severity) = assess(category, new, &delta, config);
        MetricChange {
            category: category.to_string(),
            name: "f".into(),
            path: "pkg.f".into(),
            file: PathBuf::from("pkg/f.go"),
            line: 1,
            old_value: Some(old),
            new_value: Some(new),
            delta,
            impact,
            severity,
            description: String::new(),
            suggestion: String::new(),
        }
    }

    #[test]
    fn test_function_error_threshold_is_critical() {
        let mut config = ThresholdConfig::default();
        config.function_complexity.error = 10;
        let c = change(FUNCTION_COMPLEXITY, 5.0, 12.0, &config);
        assert_eq!(c.impact, Impact::Critical);
        assert_eq!(c.severity, Severity::Critical);
        assert_eq!(classify(&c), Classification::Regression);
        assert_eq!(regression_type(&c.category), RegressionType::ComplexityRegression);
    }

    #[test]
    fn test_function_override_order() {
        let config = ThresholdConfig::default();
        let warning = change(FUNCTION_COMPLEXITY, 9.0, 11.0, &config);
        assert_eq!((warning.impact, warning.severity), (Impact::High, Severity::Warning));

        let jump = change(FUNCTION_COMPLEXITY, 1.0, 8.0, &config);
        assert_eq!((jump.impact, jump.severity), (Impact::Medium, Severity::Warning));

        // 4 -> 6 is +50%, falls through to the generic table
        let small = change(FUNCTION_COMPLEXITY, 4.0, 6.0, &config);
        assert_eq!((small.impact, small.severity), (Impact::Critical, Severity::Critical));
    }

    #[test]
    fn test_struct_and_package_overrides() {
        let config = ThresholdConfig::default();
        let fields = change(STRUCT_FIELDS, 18.0, 21.0, &config);
        assert_eq!((fields.impact, fields.severity), (Impact::High, Severity::Error));

        let growth = change(STRUCT_FIELDS, 2.0, 9.0, &config);
        assert_eq!((growth.impact, growth.severity), (Impact::Medium, Severity::Warning));

        let coupling = change(PACKAGE_COUPLING, 9.0, 11.0, &config);
        assert_eq!((coupling.impact, coupling.severity), (Impact::High, Severity::Error));
        assert_eq!(regression_type(PACKAGE_COUPLING), RegressionType::CouplingRegression);

        let cohesion = change(PACKAGE_COHESION, 0.6, 0.4, &config);
        assert_eq!((cohesion.impact, cohesion.severity), (Impact::High, Severity::Error));
        // a drop in cohesion reads as a decrease, so it is never a regression
        assert_eq!(classify(&cohesion), Classification::Improvement);
    }

    #[test]
    fn test_info_increase_is_neutral() {
        let config = ThresholdConfig::default();
        let c = change(FUNCTION_SIGNATURE, 100.0, 106.0, &config);
        assert_eq!(c.severity, Severity::Info);
        assert!(c.delta.significant);
        assert_eq!(classify(&c), Classification::Neutral);
    }

    #[test]
    fn test_typing_by_substring() {
        assert_eq!(regression_type(STRUCT_FIELDS), RegressionType::SizeRegression);
        assert_eq!(regression_type(CODEBASE_SIZE), RegressionType::SizeRegression);
        assert_eq!(regression_type(PACKAGE_COHESION), RegressionType::CohesionRegression);
        assert_eq!(regression_type("documentation_quality"), RegressionType::DocumentationRegression);
        assert_eq!(regression_type("struct"), RegressionType::ComplexityRegression);
        assert_eq!(improvement_type(PACKAGE_SIZE), ImprovementType::SizeImprovement);
    }

    #[test]
    fn test_priority_cap() {
        assert_eq!(priority(Severity::Critical, Magnitude::Critical), 10);
        assert_eq!(priority(Severity::Info, Magnitude::Minor), 3);
        assert_eq!(priority(Severity::Warning, Magnitude::Moderate), 6);
        assert_eq!(priority(Severity::Error, Magnitude::Major), 10);
    }

    #[test]
    fn test_benefit_strings() {
        assert_eq!(benefit(Magnitude::Critical), "major improvement");
        assert_eq!(benefit(Magnitude::Minor), "minor improvement");
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[], &[], &[]);
        assert_eq!(summary.quality_score, 100.0);
        assert_eq!(summary.overall_trend, Trend::Stable);
        assert_eq!(summary.total_changes, 0);
    }
}
