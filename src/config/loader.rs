use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::PatchscanConfig;
use crate::errors::ScanError;

/// Name of the configuration file searched for in the working directory
/// and its ancestors.
pub const CONFIG_FILE_NAME: &str = ".patchscan.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse config from a TOML string
pub fn parse_config(contents: &str) -> Result<PatchscanConfig, String> {
    toml::from_str::<PatchscanConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

/// Try loading config from a discovered path; problems are logged, not returned
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<PatchscanConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors up to a depth limit, starting with `start` itself
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

/// Search `start` and its ancestors for a config file.
pub fn discover_config(start: PathBuf) -> PatchscanConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            PatchscanConfig::default()
        })
}

/// Load configuration from the working directory hierarchy, or defaults.
pub fn load_config() -> PatchscanConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            PatchscanConfig::default()
        }
    }
}

/// Load a config file the user named explicitly. Unlike discovery, any
/// problem here is an error.
pub fn load_config_from(path: &Path) -> Result<PatchscanConfig, ScanError> {
    let contents = read_config_file(path).map_err(|e| {
        ScanError::config_with_path(format!("Failed to read config file: {}", e), path)
    })?;
    parse_config(&contents).map_err(|e| ScanError::config_with_path(e, path))
}
