use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Commented starter configuration; matches `TierMapConfig::default()`.
pub const DEFAULT_CONFIG: &str = r#"# tiermap configuration

# "minmax" scales every metric to [0, 1]; "zscore" uses standard scores
# clamped to [-3, 3] (fixed thresholds must then reach down to -3).
normalization = "minmax"

# "fixed", "percentile" or "quota"
tiering = "fixed"

# Position groups with fewer players are skipped
min_cohort_size = 3

# "zero" counts a missing metric as 0; "exclude" leaves it out of the score
missing_metrics = "zero"

# Also rank every player across position groups
global_rank = true

[parallel]
enabled = true
# max_concurrency = 4

# Highest tier first. A score takes the first tier whose bound it reaches.
[[thresholds.fixed]]
lower_bound = 0.80
label = "Elite"

[[thresholds.fixed]]
lower_bound = 0.60
label = "Strong"

[[thresholds.fixed]]
lower_bound = 0.40
label = "Average"

[[thresholds.fixed]]
lower_bound = 0.0
label = "Weak"

[[thresholds.percentile]]
percentile = 90.0
label = "Elite"

[[thresholds.percentile]]
percentile = 65.0
label = "Strong"

[[thresholds.percentile]]
percentile = 25.0
label = "Average"

[[thresholds.percentile]]
percentile = 0.0
label = "Weak"

[[thresholds.quota]]
share = 0.15
label = "Elite"

[[thresholds.quota]]
share = 0.25
label = "Strong"

[[thresholds.quota]]
share = 0.35
label = "Average"

[[thresholds.quota]]
share = 0.25
label = "Weak"

# Weights per position group must sum to 1.0.
# Add polarity = "lower_is_better" for metrics where less is better.
[profiles.Forward]
metrics = [
    { name = "goals", weight = 0.40 },
    { name = "assists", weight = 0.25 },
    { name = "appearances", weight = 0.15 },
    { name = "market_value", weight = 0.20 },
]

[profiles.Midfielder]
metrics = [
    { name = "goals", weight = 0.20 },
    { name = "assists", weight = 0.35 },
    { name = "appearances", weight = 0.20 },
    { name = "market_value", weight = 0.25 },
]

[profiles.Defender]
metrics = [
    { name = "goals", weight = 0.10 },
    { name = "assists", weight = 0.15 },
    { name = "clean_sheets", weight = 0.35 },
    { name = "appearances", weight = 0.20 },
    { name = "market_value", weight = 0.20 },
]

[profiles.Goalkeeper]
metrics = [
    { name = "saves", weight = 0.40 },
    { name = "clean_sheets", weight = 0.35 },
    { name = "appearances", weight = 0.15 },
    { name = "market_value", weight = 0.10 },
]
"#;

pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, TierMapConfig};

    #[test]
    fn test_default_config_text_matches_defaults() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, TierMapConfig::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiermap.toml");
        fs::write(&path, "# mine").unwrap();

        assert!(init_config(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine");

        init_config(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
