use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::comparison::Comparator;
use crate::config::{
    load_config, load_config_file, validate_thresholds, CodegaugeConfig, PresetLevel,
    ThresholdConfig,
};
use crate::io::output::OutputFormat;
use crate::io::snapshot::load_report;

pub struct CompareConfig {
    pub baseline: PathBuf,
    pub current: PathBuf,
    pub config: Option<PathBuf>,
    pub preset: Option<PresetLevel>,
    pub significance: Option<f64>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub fail_on_regression: bool,
}

/// Config file, then preset, then `--significance`; the result is validated.
pub fn resolve_thresholds(
    file_config: &CodegaugeConfig,
    preset: Option<PresetLevel>,
    significance: Option<f64>,
) -> Result<ThresholdConfig> {
    let mut thresholds = match preset {
        Some(level) => level.thresholds(),
        None => file_config.thresholds.clone(),
    };
    if let Some(level) = significance {
        thresholds.global.significance_level = level;
    }
    validate_thresholds(&thresholds)?;
    Ok(thresholds)
}

pub fn compare_reports(config: CompareConfig) -> Result<()> {
    let file_config = match &config.config {
        Some(path) => load_config_file(path)?,
        None => load_config(),
    };
    let thresholds = resolve_thresholds(&file_config, config.preset, config.significance)?;

    let baseline = load_report(&config.baseline)
        .with_context(|| format!("Failed to load baseline {}", config.baseline.display()))?;
    let current = load_report(&config.current)
        .with_context(|| format!("Failed to load current report {}", config.current.display()))?;

    let diff = Comparator::new(&thresholds).compare(&baseline, &current)?;

    let format = config
        .format
        .or(file_config.output.default_format)
        .unwrap_or(OutputFormat::Terminal);
    let mut writer = super::open_writer(format, config.output.as_deref())?;
    writer.write_diff(&diff)?;
    writer.flush()?;

    if config.fail_on_regression && diff.summary.regression_count > 0 {
        warn!(
            regressions = diff.summary.regression_count,
            critical = diff.summary.critical_issues,
            "Regressions found"
        );
        anyhow::bail!(
            "{} regression(s) found ({} critical)",
            diff.summary.regression_count,
            diff.summary.critical_issues
        );
    }

    info!(quality_score = diff.summary.quality_score, "Comparison finished");
    Ok(())
}
