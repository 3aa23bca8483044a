use crate::config::{load_config, TierMapConfig};
use crate::core::PositionGroup;
use crate::io::{create_writer, load_players, open_destination, OutputFormat};
use crate::ranking::{RankingOutcome, TierEngine};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct RankConfig {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub group: Option<String>,
    pub top: Option<usize>,
    pub summary: bool,
    pub no_parallel: bool,
    pub jobs: usize,
}

/// Apply command-line parallelism overrides on top of the loaded config.
pub fn apply_parallel_flags(mut config: TierMapConfig, no_parallel: bool, jobs: usize) -> TierMapConfig {
    if no_parallel {
        config.parallel.enabled = false;
    }
    if jobs > 0 {
        config.parallel.max_concurrency = Some(jobs);
    }
    config
}

/// Load config and players, then run one ranking pass.
///
/// Rows rejected while reading the file come first in
/// [`RankingOutcome::rejected`], followed by those dropped by the engine.
pub fn run_ranking(
    input: &Path,
    config_path: Option<&Path>,
    no_parallel: bool,
    jobs: usize,
) -> Result<RankingOutcome> {
    let config = load_config(config_path)?;
    let config = apply_parallel_flags(config, no_parallel, jobs);
    let engine = TierEngine::new(config).context("Invalid configuration")?;

    let (records, mut rejected) = load_players(input)?;
    info!("Loaded {} players from {}", records.len(), input.display());

    let mut outcome = engine.rank(&records);
    rejected.append(&mut outcome.rejected);
    outcome.rejected = rejected;
    Ok(outcome)
}

pub fn handle_rank(config: RankConfig) -> Result<()> {
    let outcome = run_ranking(
        &config.input,
        config.config.as_deref(),
        config.no_parallel,
        config.jobs,
    )?;

    let group = config.group.map(PositionGroup::new);
    if let Some(group) = &group {
        let known = outcome.groups().contains(&group)
            || outcome.failures.iter().any(|f| &f.group == group);
        if !known {
            warn!("No players in position group '{}'", group);
        }
    }
    let outcome = outcome.into_filtered(group.as_ref(), config.top);

    let destination = open_destination(config.output.as_deref())?;
    let mut writer = create_writer(config.format, destination, config.summary);
    writer.write_outcome(&outcome)?;

    if let Some(path) = &config.output {
        info!("Wrote rankings to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_flags_override_config() {
        let config = apply_parallel_flags(TierMapConfig::default(), true, 3);
        assert!(!config.parallel.enabled);
        assert_eq!(config.parallel.max_concurrency, Some(3));

        let untouched = apply_parallel_flags(TierMapConfig::default(), false, 0);
        assert_eq!(untouched.parallel, TierMapConfig::default().parallel);
    }
}
