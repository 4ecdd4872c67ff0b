use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::PresetLevel;
use crate::io::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "codegauge")]
#[command(about = "Complexity scoring and snapshot comparison for Go-style codebases", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a source bundle and write a complexity report
    Score {
        /// JSON source bundle produced by a parser front end
        bundle: PathBuf,

        /// Snapshot identifier (defaults to a UTC timestamp)
        #[arg(long)]
        id: Option<String>,

        /// Free-form snapshot label, e.g. a commit or branch name
        #[arg(long)]
        label: Option<String>,

        /// Output format (defaults to the configured format, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare two saved reports
    Compare {
        /// Baseline report (JSON)
        baseline: PathBuf,

        /// Current report (JSON)
        current: PathBuf,

        /// Configuration file (skips .codegauge.toml discovery)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Threshold preset, replacing configured thresholds
        #[arg(long, value_enum)]
        preset: Option<PresetLevel>,

        /// Significance level in percent, overriding the configured one
        #[arg(long)]
        significance: Option<f64>,

        /// Output format (defaults to the configured format, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit with an error when any regression is found
        #[arg(long)]
        fail_on_regression: bool,
    },

    /// Write a default .codegauge.toml to the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::parse_from([
            "codegauge",
            "-vv",
            "compare",
            "base.json",
            "head.json",
            "--preset",
            "strict",
            "--significance",
            "7.5",
            "-f",
            "json",
            "--fail-on-regression",
        ]);
        assert_eq!(cli.verbosity, 2);
        match cli.command {
            Commands::Compare {
                preset,
                significance,
                format,
                fail_on_regression,
                ..
            } => {
                assert_eq!(preset, Some(PresetLevel::Strict));
                assert_eq!(significance, Some(7.5));
                assert_eq!(format, Some(OutputFormat::Json));
                assert!(fail_on_regression);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
