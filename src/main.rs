use anyhow::{Context, Result};
use clap::Parser;
use codegauge::cli::{Cli, Commands};
use codegauge::commands::{compare_reports, init_config, score_bundle, CompareConfig, ScoreConfig};
use codegauge::observability::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Score {
            bundle,
            id,
            label,
            format,
            output,
        } => score_bundle(ScoreConfig {
            bundle,
            id,
            label,
            format,
            output,
        }),
        Commands::Compare {
            baseline,
            current,
            config,
            preset,
            significance,
            format,
            output,
            fail_on_regression,
        } => compare_reports(CompareConfig {
            baseline,
            current,
            config,
            preset,
            significance,
            format,
            output,
            fail_on_regression,
        }),
        Commands::Init { force } => {
            let dir = std::env::current_dir().context("Failed to get current directory")?;
            init_config(&dir, force)
        }
    }
}
