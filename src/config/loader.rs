use std::fs;
use std::path::{Path, PathBuf};

use super::core::TierMapConfig;
use super::validation::validate_config_result;
use crate::errors::{Error, Result, ResultExt};

/// File name searched for when no explicit config path is given.
pub const CONFIG_FILE_NAME: &str = "tiermap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string.
///
/// Weights and thresholds are checked here so a bad file fails before any
/// ranking work starts.
pub fn parse_config(contents: &str) -> Result<TierMapConfig> {
    let config = toml::from_str::<TierMapConfig>(contents)?;
    validate_config_result(&config)?;
    Ok(config)
}

pub fn load_config_from_path(path: &Path) -> Result<TierMapConfig> {
    let contents = fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read {}", path.display()))?;
    let config = parse_config(&contents).context(format!("Invalid {}", path.display()))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Directory ancestors of `start`, nearest first, up to a depth limit
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

/// Find the nearest `tiermap.toml` walking up from `start`.
pub fn find_config_file(start: PathBuf) -> Option<PathBuf> {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Load the config for a run.
///
/// An explicit path must exist and be valid. Without one, the nearest
/// `tiermap.toml` above the current directory is used, falling back to the
/// built-in defaults when there is none.
pub fn load_config(explicit: Option<&Path>) -> Result<TierMapConfig> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!("Failed to get current directory: {}. Using default config.", e);
            return Ok(TierMapConfig::default());
        }
    };

    match find_config_file(current) {
        Some(path) => load_config_from_path(&path),
        None => {
            tracing::debug!(
                "No {} found after checking {} directories. Using default config.",
                CONFIG_FILE_NAME,
                MAX_TRAVERSAL_DEPTH
            );
            Ok(TierMapConfig::default())
        }
    }
}
