use chrono::{DateTime, Utc};
use colored::Color;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::ThresholdConfig;
use crate::core::ReportSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    Decrease,
    Neutral,
}

/// Bucket of a percentage change, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Magnitude {
    Minor,
    Moderate,
    Significant,
    Major,
    Critical,
}

impl Magnitude {
    /// `>=50` critical, `>=25` major, `>=10` significant, `>=5` moderate, else minor.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 50.0 {
            Self::Critical
        } else if percentage >= 25.0 {
            Self::Major
        } else if percentage >= 10.0 {
            Self::Significant
        } else if percentage >= 5.0 {
            Self::Moderate
        } else {
            Self::Minor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Terminal color for this severity level.
    pub const fn color(self) -> Color {
        match self {
            Self::Critical => Color::Red,
            Self::Error => Color::Magenta,
            Self::Warning => Color::Yellow,
            Self::Info => Color::Blue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Degrading,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegressionType {
    ComplexityRegression,
    CouplingRegression,
    CohesionRegression,
    SizeRegression,
    DocumentationRegression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImprovementType {
    ComplexityImprovement,
    CouplingImprovement,
    CohesionImprovement,
    SizeImprovement,
    DocumentationImprovement,
}

/// Difference between two observations of one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    pub absolute: f64,
    /// Always non-negative; relative to the old value.
    pub percentage: f64,
    pub direction: Direction,
    pub significant: bool,
    pub magnitude: Magnitude,
}

/// One metric of one entity that differs between two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricChange {
    pub category: String,
    pub name: String,
    pub path: String,
    pub file: PathBuf,
    pub line: usize,
    pub old_value: Option<f64>,
    pub new_value: Option<f64>,
    pub delta: Delta,
    pub impact: Impact,
    pub severity: Severity,
    pub description: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    #[serde(flatten)]
    pub change: MetricChange,
    pub regression_type: RegressionType,
    /// 1 (lowest) to 10 (highest)
    pub priority: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    #[serde(flatten)]
    pub change: MetricChange,
    pub improvement_type: ImprovementType,
    pub benefit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub total_changes: usize,
    pub regression_count: usize,
    pub improvement_count: usize,
    pub neutral_change_count: usize,
    pub significant_changes: usize,
    pub critical_issues: usize,
    pub overall_trend: Trend,
    /// 0-100; exactly 100 when nothing changed significantly
    pub quality_score: f64,
}

/// Result of comparing a baseline report with a current one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityDiff {
    pub baseline: ReportSnapshot,
    pub current: ReportSnapshot,
    pub timestamp: DateTime<Utc>,
    pub config: ThresholdConfig,
    pub changes: Vec<MetricChange>,
    pub regressions: Vec<Regression>,
    pub improvements: Vec<Improvement>,
    pub summary: DiffSummary,
}

impl ComplexityDiff {
    pub fn has_critical_issues(&self) -> bool {
        self.summary.critical_issues > 0
    }
}
