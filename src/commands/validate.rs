use crate::config::{find_config_file, validate_config, TierMapConfig, CONFIG_FILE_NAME};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct ValidateConfig {
    pub config: Option<PathBuf>,
}

/// Every problem found in one configuration, in reporting order.
pub fn config_problems(config: &TierMapConfig) -> Vec<String> {
    match validate_config(config) {
        Ok(()) => Vec::new(),
        Err(errors) => errors.iter().map(ToString::to_string).collect(),
    }
}

fn resolve_path(explicit: Option<PathBuf>) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) => Ok(Some(path)),
        None => {
            let current = std::env::current_dir().context("Failed to get current directory")?;
            Ok(find_config_file(current))
        }
    }
}

fn read_config(path: &Path) -> Result<TierMapConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Invalid TOML in {}", path.display()))
}

pub fn validate_project(config: ValidateConfig) -> Result<()> {
    let mut stdout = std::io::stdout().lock();

    let Some(path) = resolve_path(config.config)? else {
        writeln!(
            stdout,
            "No {} found; the built-in defaults will be used.",
            CONFIG_FILE_NAME
        )?;
        return report(&mut stdout, "built-in defaults", &TierMapConfig::default());
    };

    let parsed = read_config(&path)?;
    report(&mut stdout, &path.display().to_string(), &parsed)
}

fn report<W: Write>(out: &mut W, source: &str, config: &TierMapConfig) -> Result<()> {
    let problems = config_problems(config);
    if problems.is_empty() {
        writeln!(
            out,
            "{} is valid ({} position profiles, {:?} tiering)",
            source,
            config.profiles.len(),
            config.tiering
        )?;
        return Ok(());
    }

    writeln!(out, "{} has {} problem(s):", source, problems.len())?;
    for problem in &problems {
        writeln!(out, "  - {}", problem)?;
    }
    anyhow::bail!("Configuration validation failed")
}
