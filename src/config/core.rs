use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::parallel::ParallelConfig;
use super::profiles::{default_profiles, PositionProfile};
use super::tiers::{ThresholdsConfig, TierPolicy, TieringKind};
use crate::core::PositionGroup;

/// Largest absolute z-score kept after normalization.
pub const ZSCORE_CLAMP: f64 = 3.0;

/// Closed interval that normalized values and composite scores live in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    pub const UNIT: ScoreRange = ScoreRange { min: 0.0, max: 1.0 };
    pub const ZSCORE: ScoreRange = ScoreRange {
        min: -ZSCORE_CLAMP,
        max: ZSCORE_CLAMP,
    };

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormalizationMethod {
    /// Rescale to [0, 1] between the cohort minimum and maximum
    #[default]
    #[serde(rename = "minmax")]
    MinMax,
    /// Standard score against the cohort mean, clamped to ±3
    #[serde(rename = "zscore")]
    ZScore,
}

impl NormalizationMethod {
    pub fn range(self) -> ScoreRange {
        match self {
            NormalizationMethod::MinMax => ScoreRange::UNIT,
            NormalizationMethod::ZScore => ScoreRange::ZSCORE,
        }
    }
}

/// Treatment of metric values absent from a player's row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingMetricPolicy {
    /// Missing values count as a raw 0.0
    #[default]
    Zero,
    /// Missing values are left out of the fit and the player's weighted sum
    Exclude,
}

/// Root configuration for a ranking pass. Immutable once the engine is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierMapConfig {
    #[serde(default)]
    pub normalization: NormalizationMethod,

    #[serde(default)]
    pub tiering: TieringKind,

    /// Smallest cohort that will be normalized
    #[serde(default = "default_min_cohort_size")]
    pub min_cohort_size: usize,

    #[serde(default)]
    pub missing_metrics: MissingMetricPolicy,

    /// Also rank every player across position groups
    #[serde(default = "default_global_rank")]
    pub global_rank: bool,

    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    #[serde(default)]
    pub parallel: ParallelConfig,

    /// Metric weights per position group
    #[serde(default = "default_profiles")]
    pub profiles: BTreeMap<PositionGroup, PositionProfile>,
}

pub fn default_min_cohort_size() -> usize {
    3
}

pub fn default_global_rank() -> bool {
    true
}

impl Default for TierMapConfig {
    fn default() -> Self {
        Self {
            normalization: NormalizationMethod::default(),
            tiering: TieringKind::default(),
            min_cohort_size: default_min_cohort_size(),
            missing_metrics: MissingMetricPolicy::default(),
            global_rank: default_global_rank(),
            thresholds: ThresholdsConfig::default(),
            parallel: ParallelConfig::default(),
            profiles: default_profiles(),
        }
    }
}

impl TierMapConfig {
    pub fn score_range(&self) -> ScoreRange {
        self.normalization.range()
    }

    pub fn tier_policy(&self) -> TierPolicy {
        TierPolicy::from_config(self.tiering, &self.thresholds)
    }

    pub fn profile(&self, group: &PositionGroup) -> Option<&PositionProfile> {
        self.profiles.get(group)
    }

    pub fn with_profile(mut self, group: impl Into<PositionGroup>, profile: PositionProfile) -> Self {
        self.profiles.insert(group.into(), profile);
        self
    }
}
