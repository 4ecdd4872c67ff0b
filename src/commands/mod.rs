//! Command implementations behind the `codegauge` binary.
//!
//! - **score**: assemble a report from a source bundle
//! - **compare**: diff two saved reports
//! - **init**: write a default configuration file

pub mod compare;
pub mod init;
pub mod score;

pub use compare::{compare_reports, CompareConfig};
pub use init::init_config;
pub use score::{score_bundle, ScoreConfig};

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::io::output::{create_writer, OutputFormat, OutputWriter};

/// Writer for `--output`, or stdout. Colors are disabled for files.
pub(crate) fn open_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => {
            colored::control::set_override(false);
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout()),
    };
    Ok(create_writer(format, sink))
}
