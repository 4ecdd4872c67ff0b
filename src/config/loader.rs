use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::validation::{validate_thresholds, ConfigError};
use super::CodegaugeConfig;

pub const CONFIG_FILE_NAME: &str = ".codegauge.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse TOML contents and validate the thresholds they carry.
pub fn parse_and_validate_config(
    contents: &str,
    source_name: &str,
) -> Result<CodegaugeConfig, ConfigError> {
    let config = toml::from_str::<CodegaugeConfig>(contents).map_err(|e| ConfigError::Parse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })?;
    validate_thresholds(&config.thresholds)?;
    Ok(config)
}

/// Load a config file the user named explicitly; any failure is reported.
pub fn load_config_file(path: &Path) -> crate::Result<CodegaugeConfig> {
    let contents = read_config_file(path).map_err(|e| {
        crate::core::errors::Error::file_system("Failed to read config file", path, e)
    })?;
    let config = parse_and_validate_config(&contents, &path.display().to_string())?;
    debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<CodegaugeConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents, &config_path.display().to_string()) {
        Ok(config) => {
            debug!(path = %config_path.display(), "Loaded config");
            Some(config)
        }
        Err(e) => {
            warn!("{}. Using defaults.", e);
            Some(CodegaugeConfig::default())
        }
    }
}

fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // "not found" is the normal case while walking ancestors
    if error.kind() != std::io::ErrorKind::NotFound {
        warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` followed by its parents, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Per-user config file, `<config dir>/codegauge/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("codegauge").join("config.toml"))
}

/// Search `start` and its ancestors for `.codegauge.toml`, then the user
/// config file. Falls back to defaults when nothing usable is found.
pub fn load_config_from(start: &Path) -> CodegaugeConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .chain(user_config_path())
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            CodegaugeConfig::default()
        })
}

pub fn load_config() -> CodegaugeConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(&dir),
        Err(e) => {
            warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            CodegaugeConfig::default()
        }
    }
}
