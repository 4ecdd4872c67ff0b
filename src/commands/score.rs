use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use tracing::info;

use crate::analysis::ReportBuilder;
use crate::config::load_config;
use crate::io::output::OutputFormat;
use crate::io::snapshot::{load_bundle, save_report};

pub struct ScoreConfig {
    pub bundle: PathBuf,
    pub id: Option<String>,
    pub label: Option<String>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
}

pub fn score_bundle(config: ScoreConfig) -> Result<()> {
    let bundle = load_bundle(&config.bundle)
        .with_context(|| format!("Failed to load source bundle {}", config.bundle.display()))?;

    let timestamp = Utc::now();
    let id = config
        .id
        .unwrap_or_else(|| timestamp.format("%Y%m%dT%H%M%SZ").to_string());

    let mut builder = ReportBuilder::new(id).with_timestamp(timestamp);
    if let Some(label) = config.label {
        builder = builder.with_label(label);
    }
    let report = builder.build(&bundle);
    info!(id = %report.snapshot.id, "Scored source bundle");

    let format = config
        .format
        .or_else(|| load_config().output.default_format)
        .unwrap_or(OutputFormat::Terminal);
    if let (OutputFormat::Json, Some(path)) = (format, config.output.as_deref()) {
        save_report(path, &report)
            .with_context(|| format!("Failed to save report to {}", path.display()))?;
        return Ok(());
    }

    let mut writer = super::open_writer(format, config.output.as_deref())?;
    writer.write_report(&report)?;
    writer.flush()?;
    Ok(())
}
