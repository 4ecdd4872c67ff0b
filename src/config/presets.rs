//! Threshold presets for common quality bars.
//!
//! - **Strict**: low tolerance for complexity growth
//! - **Balanced**: the defaults
//! - **Lenient**: for legacy code or inherently complex domains

use serde::{Deserialize, Serialize};

use super::thresholds::{
    FunctionComplexityThresholds, GlobalThresholds, PackageThresholds, StructComplexityThresholds,
    ThresholdConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PresetLevel {
    Strict,
    #[default]
    Balanced,
    Lenient,
}

impl PresetLevel {
    pub fn thresholds(self) -> ThresholdConfig {
        match self {
            PresetLevel::Strict => strict_preset(),
            PresetLevel::Balanced => ThresholdConfig::default(),
            PresetLevel::Lenient => lenient_preset(),
        }
    }
}

fn strict_preset() -> ThresholdConfig {
    ThresholdConfig {
        global: GlobalThresholds {
            significance_level: 5.0,
        },
        function_complexity: FunctionComplexityThresholds {
            warning: 7,
            error: 15,
            max_increase: 3,
        },
        struct_complexity: StructComplexityThresholds {
            max_fields: 15,
            field_increase: 3,
        },
        package_metrics: PackageThresholds {
            max_coupling: 7.0,
            min_cohesion: 0.6,
        },
    }
}

fn lenient_preset() -> ThresholdConfig {
    ThresholdConfig {
        global: GlobalThresholds {
            significance_level: 10.0,
        },
        function_complexity: FunctionComplexityThresholds {
            warning: 15,
            error: 30,
            max_increase: 10,
        },
        struct_complexity: StructComplexityThresholds {
            max_fields: 30,
            field_increase: 10,
        },
        package_metrics: PackageThresholds {
            max_coupling: 15.0,
            min_cohesion: 0.3,
        },
    }
}
