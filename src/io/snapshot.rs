//! JSON persistence for reports and source bundles.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::core::ast::SourceBundle;
use crate::core::errors::{Error, Result, ResultExt};
use crate::core::Report;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read file", path, e))?;
    serde_json::from_str(&contents)
        .map_err(Error::from)
        .context(format!("Invalid JSON in {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| Error::file_system("Failed to create directory", parent, e))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| Error::file_system("Failed to write file", path, e))
}

pub fn load_report(path: &Path) -> Result<Report> {
    let report: Report = read_json(path)?;
    debug!(
        path = %path.display(),
        id = %report.snapshot.id,
        functions = report.functions.len(),
        "Loaded report"
    );
    Ok(report)
}

pub fn save_report(path: &Path, report: &Report) -> Result<()> {
    write_json(path, report)?;
    debug!(path = %path.display(), id = %report.snapshot.id, "Saved report");
    Ok(())
}

pub fn load_bundle(path: &Path) -> Result<SourceBundle> {
    let bundle: SourceBundle = read_json(path)?;
    debug!(path = %path.display(), files = bundle.files.len(), "Loaded source bundle");
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ReportSnapshot;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_report() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("snapshots").join("base.json");
        let report = Report::empty(ReportSnapshot::new("base", Utc::now()));

        save_report(&path, &report).unwrap();
        assert_eq!(load_report(&path).unwrap(), report);
    }

    #[test]
    fn test_missing_file_is_file_system_error() {
        let temp = TempDir::new().unwrap();
        let err = load_report(&temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
    }

    #[test]
    fn test_invalid_json_mentions_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_bundle(&path).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }
}
