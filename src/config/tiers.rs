//! Tier threshold configuration for the supported tiering policies.

use super::core::ScoreRange;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Allowed deviation of quota shares from a total of 1.0.
pub const QUOTA_SUM_EPSILON: f64 = 1e-6;

/// Which threshold list drives tier assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieringKind {
    /// Fixed score cut points
    #[default]
    Fixed,
    /// Cut points at cohort score percentiles
    Percentile,
    /// Fixed share of the cohort per tier, filled in rank order
    Quota,
}

/// Lower score bound (inclusive) of a tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedThreshold {
    pub lower_bound: f64,
    pub label: String,
}

/// Cohort percentile (0-100, inclusive) at which a tier starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileThreshold {
    pub percentile: f64,
    pub label: String,
}

/// Share of the cohort (0-1] that falls into a tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaBand {
    pub share: f64,
    pub label: String,
}

/// Threshold lists for every policy, highest tier first.
///
/// Only the list selected by `tiering` is used; the others keep their
/// defaults so switching policy needs a single setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_fixed_thresholds")]
    pub fixed: Vec<FixedThreshold>,

    #[serde(default = "default_percentile_thresholds")]
    pub percentile: Vec<PercentileThreshold>,

    #[serde(default = "default_quota_bands")]
    pub quota: Vec<QuotaBand>,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            fixed: default_fixed_thresholds(),
            percentile: default_percentile_thresholds(),
            quota: default_quota_bands(),
        }
    }
}

pub fn default_fixed_thresholds() -> Vec<FixedThreshold> {
    [(0.80, "Elite"), (0.60, "Strong"), (0.40, "Average"), (0.0, "Weak")]
        .into_iter()
        .map(|(lower_bound, label)| FixedThreshold {
            lower_bound,
            label: label.to_string(),
        })
        .collect()
}

pub fn default_percentile_thresholds() -> Vec<PercentileThreshold> {
    [(90.0, "Elite"), (65.0, "Strong"), (25.0, "Average"), (0.0, "Weak")]
        .into_iter()
        .map(|(percentile, label)| PercentileThreshold {
            percentile,
            label: label.to_string(),
        })
        .collect()
}

pub fn default_quota_bands() -> Vec<QuotaBand> {
    [(0.15, "Elite"), (0.25, "Strong"), (0.35, "Average"), (0.25, "Weak")]
        .into_iter()
        .map(|(share, label)| QuotaBand {
            share,
            label: label.to_string(),
        })
        .collect()
}

/// The resolved tiering policy for a ranking pass.
#[derive(Debug, Clone, PartialEq)]
pub enum TierPolicy {
    Fixed(Vec<FixedThreshold>),
    Percentile(Vec<PercentileThreshold>),
    Quota(Vec<QuotaBand>),
}

impl TierPolicy {
    pub fn from_config(kind: TieringKind, thresholds: &ThresholdsConfig) -> Self {
        match kind {
            TieringKind::Fixed => TierPolicy::Fixed(thresholds.fixed.clone()),
            TieringKind::Percentile => TierPolicy::Percentile(thresholds.percentile.clone()),
            TieringKind::Quota => TierPolicy::Quota(thresholds.quota.clone()),
        }
    }

    pub fn kind(&self) -> TieringKind {
        match self {
            TierPolicy::Fixed(_) => TieringKind::Fixed,
            TierPolicy::Percentile(_) => TieringKind::Percentile,
            TierPolicy::Quota(_) => TieringKind::Quota,
        }
    }

    /// Tier labels, highest tier first.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            TierPolicy::Fixed(list) => list.iter().map(|t| t.label.as_str()).collect(),
            TierPolicy::Percentile(list) => list.iter().map(|t| t.label.as_str()).collect(),
            TierPolicy::Quota(list) => list.iter().map(|t| t.label.as_str()).collect(),
        }
    }

    /// Whether assignment needs every cohort score before the first tier is known.
    pub fn is_cohort_relative(&self) -> bool {
        !matches!(self, TierPolicy::Fixed(_))
    }

    /// Collect every problem with the thresholds, given the score range they
    /// must cover.
    pub fn validation_errors(&self, range: ScoreRange) -> Vec<String> {
        let labels = self.labels();
        if labels.is_empty() {
            return vec![format!("{:?} tiering needs at least one tier", self.kind())];
        }

        let mut errors = label_errors(&labels);
        match self {
            TierPolicy::Fixed(list) => {
                let bounds: Vec<f64> = list.iter().map(|t| t.lower_bound).collect();
                errors.extend(descending_errors("lower_bound", &bounds));
                if let Some(&top) = bounds.iter().find(|b| **b > range.max) {
                    errors.push(format!(
                        "lower_bound {} is above the maximum score {}",
                        top, range.max
                    ));
                }
                if let Some(&lowest) = bounds.last() {
                    if lowest > range.min {
                        errors.push(format!(
                            "lowest lower_bound {} leaves scores from {} uncovered",
                            lowest, range.min
                        ));
                    }
                }
            }
            TierPolicy::Percentile(list) => {
                let bounds: Vec<f64> = list.iter().map(|t| t.percentile).collect();
                errors.extend(descending_errors("percentile", &bounds));
                for p in &bounds {
                    if !(0.0..=100.0).contains(p) {
                        errors.push(format!("percentile {} outside 0-100", p));
                    }
                }
                if bounds.last().is_some_and(|p| *p != 0.0) {
                    errors.push("lowest percentile must be 0 to cover every player".to_string());
                }
            }
            TierPolicy::Quota(list) => {
                for band in list {
                    if !(band.share.is_finite() && band.share > 0.0 && band.share <= 1.0) {
                        errors.push(format!(
                            "share {} for '{}' must be in (0, 1]",
                            band.share, band.label
                        ));
                    }
                }
                let total: f64 = list.iter().map(|b| b.share).sum();
                if !total.is_finite() || (total - 1.0).abs() > QUOTA_SUM_EPSILON {
                    errors.push(format!("quota shares must sum to 1.0, but sum to {:.6}", total));
                }
            }
        }
        errors
    }

    pub fn validate(&self, range: ScoreRange) -> Result<()> {
        let errors = self.validation_errors(range);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::configuration(format!(
                "invalid {:?} thresholds: {}",
                self.kind(),
                errors.join("; ")
            )))
        }
    }
}

fn label_errors(labels: &[&str]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for label in labels {
        if label.trim().is_empty() {
            errors.push("tier label must not be empty".to_string());
        } else if !seen.insert(*label) {
            errors.push(format!("tier label '{}' is used more than once", label));
        }
    }
    errors
}

fn descending_errors(field: &str, bounds: &[f64]) -> Vec<String> {
    let mut errors: Vec<String> = bounds
        .iter()
        .filter(|b| !b.is_finite())
        .map(|b| format!("{} {} is not a finite number", field, b))
        .collect();
    for pair in bounds.windows(2) {
        if pair[1] >= pair[0] {
            errors.push(format!(
                "{} values must be strictly decreasing ({} then {})",
                field, pair[0], pair[1]
            ));
        }
    }
    errors
}
