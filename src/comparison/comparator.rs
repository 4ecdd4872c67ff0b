use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, info_span};

use super::classifier::{self, Classification};
use super::delta::{added_delta, calculate_delta, removed_delta};
use super::types::{ComplexityDiff, Delta, Direction, Impact, MetricChange, Severity};
use crate::config::ThresholdConfig;
use crate::core::{ComplexitySummary, FunctionMetrics, PackageMetrics, Report, StructMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSide {
    Baseline,
    Current,
}

impl fmt::Display for SnapshotSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotSide::Baseline => write!(f, "baseline"),
            SnapshotSide::Current => write!(f, "current"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    #[error("The {side} snapshot has no identifier")]
    MissingSnapshotId { side: SnapshotSide },
}

/// One scalar observation of an entity.
struct Sample {
    category: &'static str,
    label: &'static str,
    value: f64,
}

impl Sample {
    fn new(category: &'static str, label: &'static str, value: f64) -> Self {
        Self {
            category,
            label,
            value,
        }
    }
}

/// An entity that can be matched across two snapshots.
trait Comparable {
    const KIND: &'static str;

    fn key(&self) -> String;
    fn name(&self) -> &str;
    fn location(&self) -> (&Path, usize);
    fn samples(&self) -> Vec<Sample>;
    /// Value recorded on added/removed changes.
    fn primary_value(&self) -> f64;
}

impl Comparable for FunctionMetrics {
    const KIND: &'static str = "function";

    fn key(&self) -> String {
        FunctionMetrics::key(self)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> (&Path, usize) {
        (&self.file, self.line)
    }

    fn samples(&self) -> Vec<Sample> {
        vec![
            Sample::new(
                classifier::FUNCTION_COMPLEXITY,
                "cyclomatic complexity",
                f64::from(self.complexity.cyclomatic),
            ),
            Sample::new(
                classifier::FUNCTION_COGNITIVE,
                "cognitive complexity",
                f64::from(self.complexity.cognitive),
            ),
            Sample::new(
                classifier::FUNCTION_NESTING,
                "nesting depth",
                f64::from(self.complexity.nesting_depth),
            ),
            Sample::new(
                classifier::FUNCTION_SIGNATURE,
                "signature complexity",
                self.signature.score,
            ),
        ]
    }

    fn primary_value(&self) -> f64 {
        f64::from(self.complexity.cyclomatic)
    }
}

impl Comparable for StructMetrics {
    const KIND: &'static str = "struct";

    fn key(&self) -> String {
        StructMetrics::key(self)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> (&Path, usize) {
        (&self.file, self.line)
    }

    fn samples(&self) -> Vec<Sample> {
        vec![
            Sample::new(
                classifier::STRUCT_FIELDS,
                "field count",
                f64::from(self.total_fields),
            ),
            Sample::new(
                classifier::STRUCT_COMPLEXITY,
                "struct complexity",
                self.complexity.overall,
            ),
        ]
    }

    fn primary_value(&self) -> f64 {
        f64::from(self.total_fields)
    }
}

impl Comparable for PackageMetrics {
    const KIND: &'static str = "package";

    fn key(&self) -> String {
        self.path.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> (&Path, usize) {
        (Path::new(&self.path), 0)
    }

    fn samples(&self) -> Vec<Sample> {
        vec![
            Sample::new(classifier::PACKAGE_COUPLING, "coupling", self.coupling_score),
            Sample::new(classifier::PACKAGE_COHESION, "cohesion", self.cohesion_score),
            Sample::new(
                classifier::PACKAGE_SIZE,
                "function count",
                self.function_count as f64,
            ),
        ]
    }

    fn primary_value(&self) -> f64 {
        self.function_count as f64
    }
}

/// Keyed lookup of one category; on duplicate keys the entity that comes
/// first in (file, line) order wins.
fn index<T: Comparable>(items: &[T]) -> BTreeMap<String, &T> {
    let mut ordered: Vec<&T> = items.iter().collect();
    ordered.sort_by(|a, b| a.location().cmp(&b.location()));

    let mut lookup = BTreeMap::new();
    for item in ordered {
        lookup.entry(item.key()).or_insert(item);
    }
    lookup
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn suggestion_for(category: &str, direction: Direction) -> &'static str {
    let worsened = match category {
        classifier::PACKAGE_COHESION => direction == Direction::Decrease,
        _ => direction == Direction::Increase,
    };
    if !worsened {
        return "No action needed";
    }
    match category {
        classifier::FUNCTION_COMPLEXITY => "Split the function into smaller functions",
        classifier::FUNCTION_COGNITIVE => "Flatten nested conditionals with early returns",
        classifier::FUNCTION_NESTING => "Reduce nesting with guard clauses",
        classifier::FUNCTION_SIGNATURE => "Group related parameters into a struct",
        classifier::STRUCT_FIELDS => "Split the struct into smaller focused types",
        classifier::STRUCT_COMPLEXITY => {
            "Replace function-typed and embedded fields with explicit dependencies"
        }
        classifier::PACKAGE_COUPLING => "Reduce the number of imported packages",
        classifier::PACKAGE_COHESION => "Move functions next to the types they operate on",
        classifier::PACKAGE_SIZE => "Split the package along its responsibilities",
        _ => "Review recent changes for complexity growth",
    }
}

/// Compares two reports under one set of thresholds.
pub struct Comparator {
    config: ThresholdConfig,
}

impl Comparator {
    pub fn new(config: &ThresholdConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Full comparison of `baseline` against `current`.
    ///
    /// Fails only when either snapshot lacks an identifier. Output is
    /// deterministic: keys are visited in sorted order and the diff carries
    /// the current snapshot's timestamp.
    pub fn compare(&self, baseline: &Report, current: &Report) -> Result<ComplexityDiff, DiffError> {
        if !baseline.snapshot.has_valid_id() {
            return Err(DiffError::MissingSnapshotId {
                side: SnapshotSide::Baseline,
            });
        }
        if !current.snapshot.has_valid_id() {
            return Err(DiffError::MissingSnapshotId {
                side: SnapshotSide::Current,
            });
        }

        let _span = info_span!(
            "compare_snapshots",
            baseline = %baseline.snapshot.id,
            current = %current.snapshot.id
        )
        .entered();

        let mut changes = Vec::new();
        changes.extend(self.compare_category(&baseline.functions, &current.functions));
        changes.extend(self.compare_category(&baseline.structs, &current.structs));
        changes.extend(self.compare_category(&baseline.packages, &current.packages));
        changes.extend(self.compare_aggregate(&baseline.summary, &current.summary));

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        for change in &changes {
            match classifier::classify(change) {
                Classification::Regression => regressions.push(classifier::to_regression(change)),
                Classification::Improvement => {
                    improvements.push(classifier::to_improvement(change))
                }
                Classification::Neutral => {}
            }
        }

        regressions.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| a.change.file.cmp(&b.change.file))
                .then_with(|| a.change.line.cmp(&b.change.line))
                .then_with(|| a.change.path.cmp(&b.change.path))
                .then_with(|| a.change.category.cmp(&b.change.category))
        });

        let summary = classifier::summarize(&changes, &regressions, &improvements);
        info!(
            changes = summary.total_changes,
            regressions = summary.regression_count,
            improvements = summary.improvement_count,
            critical = summary.critical_issues,
            "Snapshot comparison complete"
        );

        Ok(ComplexityDiff {
            baseline: baseline.snapshot.clone(),
            current: current.snapshot.clone(),
            timestamp: current.snapshot.timestamp,
            config: self.config.clone(),
            changes,
            regressions,
            improvements,
            summary,
        })
    }

    fn compare_category<T: Comparable>(&self, baseline: &[T], current: &[T]) -> Vec<MetricChange> {
        let before = index(baseline);
        let after = index(current);
        let keys: BTreeSet<&String> = before.keys().chain(after.keys()).collect();

        let mut changes = Vec::new();
        for key in keys {
            match (before.get(key), after.get(key)) {
                (Some(old), Some(new)) => changes.extend(self.compare_entity(key, *old, *new)),
                (Some(old), None) => changes.push(removed_change(key, *old)),
                (None, Some(new)) => changes.push(added_change(key, *new)),
                (None, None) => {}
            }
        }

        debug!(
            kind = T::KIND,
            baseline = before.len(),
            current = after.len(),
            changes = changes.len(),
            "Compared category"
        );
        changes
    }

    fn compare_entity<T: Comparable>(&self, key: &str, old: &T, new: &T) -> Vec<MetricChange> {
        let (file, line) = new.location();
        old.samples()
            .into_iter()
            .zip(new.samples())
            .filter(|(before, after)| before.value != after.value)
            .map(|(before, after)| {
                self.metric_change(
                    after.category,
                    new.name(),
                    key,
                    file.to_path_buf(),
                    line,
                    before.value,
                    after.value,
                    &format!("{} of {} {}", after.label, T::KIND, key),
                )
            })
            .collect()
    }

    fn compare_aggregate(
        &self,
        baseline: &ComplexitySummary,
        current: &ComplexitySummary,
    ) -> Vec<MetricChange> {
        let pairs = [
            (
                classifier::OVERALL_COMPLEXITY,
                "average_cyclomatic",
                baseline.average_cyclomatic,
                current.average_cyclomatic,
            ),
            (
                classifier::OVERALL_COMPLEXITY,
                "max_cyclomatic",
                f64::from(baseline.max_cyclomatic),
                f64::from(current.max_cyclomatic),
            ),
            (
                classifier::CODEBASE_SIZE,
                "total_functions",
                baseline.total_functions as f64,
                current.total_functions as f64,
            ),
            (
                classifier::CODEBASE_SIZE,
                "total_structs",
                baseline.total_structs as f64,
                current.total_structs as f64,
            ),
        ];

        pairs
            .into_iter()
            .filter(|(_, _, old, new)| old != new)
            .map(|(category, name, old, new)| {
                self.metric_change(
                    category,
                    name,
                    "codebase",
                    PathBuf::new(),
                    0,
                    old,
                    new,
                    &format!("{} of the codebase", name.replace('_', " ")),
                )
            })
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn metric_change(
        &self,
        category: &str,
        name: &str,
        path: &str,
        file: PathBuf,
        line: usize,
        old: f64,
        new: f64,
        subject: &str,
    ) -> MetricChange {
        let delta = calculate_delta(old, new, self.config.global.significance_level);
        let (impact, severity) = classifier::assess(category, new, &delta, &self.config);
        let description = describe(subject, old, new, &delta);
        MetricChange {
            category: category.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            file,
            line,
            old_value: Some(old),
            new_value: Some(new),
            suggestion: suggestion_for(category, delta.direction).to_string(),
            delta,
            impact,
            severity,
            description,
        }
    }
}

fn describe(subject: &str, old: f64, new: f64, delta: &Delta) -> String {
    let verb = match delta.direction {
        Direction::Increase => "increased",
        Direction::Decrease => "decreased",
        Direction::Neutral => "stayed",
    };
    format!(
        "{} {} from {} to {} ({:.1}%)",
        capitalize(subject),
        verb,
        format_value(old),
        format_value(new),
        delta.percentage
    )
}

fn removed_change<T: Comparable>(key: &str, entity: &T) -> MetricChange {
    let (file, line) = entity.location();
    let value = entity.primary_value();
    MetricChange {
        category: T::KIND.to_string(),
        name: entity.name().to_string(),
        path: key.to_string(),
        file: file.to_path_buf(),
        line,
        old_value: Some(value),
        new_value: None,
        delta: removed_delta(value),
        impact: Impact::Medium,
        severity: Severity::Warning,
        description: format!("{} {} was removed", capitalize(T::KIND), key),
        suggestion: "Verify removal was intentional".to_string(),
    }
}

fn added_change<T: Comparable>(key: &str, entity: &T) -> MetricChange {
    let (file, line) = entity.location();
    let value = entity.primary_value();
    MetricChange {
        category: T::KIND.to_string(),
        name: entity.name().to_string(),
        path: key.to_string(),
        file: file.to_path_buf(),
        line,
        old_value: None,
        new_value: Some(value),
        delta: added_delta(value),
        impact: Impact::Low,
        severity: Severity::Info,
        description: format!("{} {} was added", capitalize(T::KIND), key),
        suggestion: format!("Review the new {} for complexity", T::KIND),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
