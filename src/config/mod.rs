//! Configuration: threshold values, presets and `.codegauge.toml` discovery.

mod loader;
pub mod presets;
mod thresholds;
pub mod validation;

use serde::{Deserialize, Serialize};

use crate::io::output::OutputFormat;

pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from,
    parse_and_validate_config, user_config_path, CONFIG_FILE_NAME,
};
pub use presets::PresetLevel;
pub use thresholds::{
    FunctionComplexityThresholds, GlobalThresholds, PackageThresholds,
    StructComplexityThresholds, ThresholdConfig,
};
pub use validation::{validate_thresholds, ConfigError, FieldIssue};

/// Root of `.codegauge.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodegaugeConfig {
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Format used when `--format` is not given on the command line
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
}

/// Contents written by `codegauge init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# codegauge configuration

[thresholds.global]
# Minimum percentage change for a delta to count as significant
significance_level = 5.0

[thresholds.function_complexity]
warning = 10
error = 20
max_increase = 5

[thresholds.struct_complexity]
max_fields = 20
field_increase = 5

[thresholds.package_metrics]
max_coupling = 10.0
min_cohesion = 0.5

[output]
default_format = "terminal"
"#;
