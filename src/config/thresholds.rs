use serde::{Deserialize, Serialize};

/// Thresholds driving significance, severity and impact in snapshot diffs.
///
/// Passed by value into [`crate::comparison::Comparator`]; the engine never
/// mutates it or reads thresholds from anywhere else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default)]
    pub global: GlobalThresholds,

    #[serde(default)]
    pub function_complexity: FunctionComplexityThresholds,

    #[serde(default)]
    pub struct_complexity: StructComplexityThresholds,

    #[serde(default)]
    pub package_metrics: PackageThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalThresholds {
    /// Minimum percentage change for a delta to count as significant (0-100)
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,
}

impl Default for GlobalThresholds {
    fn default() -> Self {
        Self {
            significance_level: default_significance_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionComplexityThresholds {
    /// Cyclomatic complexity above which a function is flagged high impact
    #[serde(default = "default_function_warning")]
    pub warning: u32,

    /// Cyclomatic complexity above which a function is flagged critical
    #[serde(default = "default_function_error")]
    pub error: u32,

    /// Largest tolerated cyclomatic increase between two snapshots
    #[serde(default = "default_max_increase")]
    pub max_increase: u32,
}

impl Default for FunctionComplexityThresholds {
    fn default() -> Self {
        Self {
            warning: default_function_warning(),
            error: default_function_error(),
            max_increase: default_max_increase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructComplexityThresholds {
    #[serde(default = "default_max_fields")]
    pub max_fields: u32,

    #[serde(default = "default_field_increase")]
    pub field_increase: u32,
}

impl Default for StructComplexityThresholds {
    fn default() -> Self {
        Self {
            max_fields: default_max_fields(),
            field_increase: default_field_increase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageThresholds {
    /// Distinct imports above which a package is considered over-coupled
    #[serde(default = "default_max_coupling")]
    pub max_coupling: f64,

    /// Cohesion (0.0-1.0) below which a package is flagged
    #[serde(default = "default_min_cohesion")]
    pub min_cohesion: f64,
}

impl Default for PackageThresholds {
    fn default() -> Self {
        Self {
            max_coupling: default_max_coupling(),
            min_cohesion: default_min_cohesion(),
        }
    }
}

fn default_significance_level() -> f64 {
    5.0
}
fn default_function_warning() -> u32 {
    10
}
fn default_function_error() -> u32 {
    20
}
fn default_max_increase() -> u32 {
    5
}
fn default_max_fields() -> u32 {
    20
}
fn default_field_increase() -> u32 {
    5
}
fn default_max_coupling() -> f64 {
    10.0
}
fn default_min_cohesion() -> f64 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ThresholdConfig::default();
        assert_eq!(config.global.significance_level, 5.0);
        assert_eq!(config.function_complexity.warning, 10);
        assert_eq!(config.function_complexity.error, 20);
        assert_eq!(config.function_complexity.max_increase, 5);
        assert_eq!(config.struct_complexity.max_fields, 20);
        assert_eq!(config.struct_complexity.field_increase, 5);
        assert_eq!(config.package_metrics.max_coupling, 10.0);
        assert_eq!(config.package_metrics.min_cohesion, 0.5);
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let config: ThresholdConfig = toml::from_str(
            r#"
            [function_complexity]
            error = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.function_complexity.error, 12);
        assert_eq!(config.function_complexity.warning, 10);
        assert_eq!(config.global.significance_level, 5.0);
    }
}
