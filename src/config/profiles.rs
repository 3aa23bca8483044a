//! Position profiles: which metrics matter for a position group and how much.

use crate::core::PositionGroup;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Allowed deviation of a profile's weight sum from 1.0.
pub const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Direction in which a raw metric value is good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    #[default]
    HigherIsBetter,
    /// Cards, turnovers, goals conceded and similar.
    LowerIsBetter,
}

impl Polarity {
    /// Orient a raw value so that larger always means better.
    pub fn orient(self, raw: f64) -> f64 {
        match self {
            Polarity::HigherIsBetter => raw,
            Polarity::LowerIsBetter => -raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricWeight {
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub polarity: Polarity,
}

impl MetricWeight {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            polarity: Polarity::HigherIsBetter,
        }
    }

    pub fn lower_is_better(mut self) -> Self {
        self.polarity = Polarity::LowerIsBetter;
        self
    }
}

/// Weighted metric set for one position group. Weights sum to 1.0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionProfile {
    pub metrics: Vec<MetricWeight>,
}

impl PositionProfile {
    pub fn new(metrics: Vec<MetricWeight>) -> Self {
        Self { metrics }
    }

    pub fn weight_sum(&self) -> f64 {
        self.metrics.iter().map(|m| m.weight).sum()
    }

    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|m| m.name.as_str())
    }

    pub fn is_valid_weight(weight: f64) -> bool {
        weight.is_finite() && (0.0..=1.0).contains(&weight)
    }

    /// Collect every problem with this profile.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.metrics.is_empty() {
            errors.push("profile has no metrics".to_string());
            return errors;
        }

        let mut seen = HashSet::new();
        for metric in &self.metrics {
            if metric.name.trim().is_empty() {
                errors.push("metric name must not be empty".to_string());
            } else if !seen.insert(metric.name.as_str()) {
                errors.push(format!("metric '{}' is listed more than once", metric.name));
            }
            if !Self::is_valid_weight(metric.weight) {
                errors.push(format!(
                    "weight for '{}' out of range: {} (must be 0.0-1.0)",
                    metric.name, metric.weight
                ));
            }
        }

        let sum = self.weight_sum();
        if !sum.is_finite() || (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            errors.push(format!("weights must sum to 1.0, but sum to {:.6}", sum));
        }

        errors
    }

    pub fn validate(&self) -> Result<()> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::configuration(errors.join("; ")))
        }
    }
}

/// Profiles for the four standard outfield and goalkeeping groups.
pub fn default_profiles() -> BTreeMap<PositionGroup, PositionProfile> {
    let mut profiles = BTreeMap::new();
    profiles.insert(
        PositionGroup::new("Forward"),
        PositionProfile::new(vec![
            MetricWeight::new("goals", 0.40),
            MetricWeight::new("assists", 0.25),
            MetricWeight::new("appearances", 0.15),
            MetricWeight::new("market_value", 0.20),
        ]),
    );
    profiles.insert(
        PositionGroup::new("Midfielder"),
        PositionProfile::new(vec![
            MetricWeight::new("goals", 0.20),
            MetricWeight::new("assists", 0.35),
            MetricWeight::new("appearances", 0.20),
            MetricWeight::new("market_value", 0.25),
        ]),
    );
    profiles.insert(
        PositionGroup::new("Defender"),
        PositionProfile::new(vec![
            MetricWeight::new("goals", 0.10),
            MetricWeight::new("assists", 0.15),
            MetricWeight::new("clean_sheets", 0.35),
            MetricWeight::new("appearances", 0.20),
            MetricWeight::new("market_value", 0.20),
        ]),
    );
    profiles.insert(
        PositionGroup::new("Goalkeeper"),
        PositionProfile::new(vec![
            MetricWeight::new("saves", 0.40),
            MetricWeight::new("clean_sheets", 0.35),
            MetricWeight::new("appearances", 0.15),
            MetricWeight::new("market_value", 0.10),
        ]),
    );
    profiles
}
