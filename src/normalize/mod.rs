//! Metric normalization within a position-group cohort.
//!
//! Each profile metric gets its own scaler, fit on the cohort's values after
//! polarity orientation, so a lower-is-better metric is inverted before it is
//! rescaled. Scalers never mix position groups.

use crate::config::{
    MissingMetricPolicy, NormalizationMethod, Polarity, PositionProfile, ScoreRange, TierMapConfig,
};
use crate::core::{NormalizedMetric, NormalizedRecord, PlayerRecord, PositionGroup};
use crate::errors::{Error, Result};
use tracing::debug;

/// Spread below which a metric is treated as constant across the cohort.
const SPREAD_EPSILON: f64 = 1e-12;

/// A normalization function fit to one metric of one cohort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricScaler {
    MinMax { min: f64, max: f64 },
    ZScore { mean: f64, stddev: f64 },
    /// Zero-variance metric; every value maps to the range midpoint.
    Constant { midpoint: f64 },
}

impl MetricScaler {
    /// Fit a scaler to oriented values. Returns `None` for an empty slice.
    pub fn fit(method: NormalizationMethod, values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let midpoint = method.range().midpoint();

        let scaler = match method {
            NormalizationMethod::MinMax => {
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                if max - min < SPREAD_EPSILON {
                    MetricScaler::Constant { midpoint }
                } else {
                    MetricScaler::MinMax { min, max }
                }
            }
            NormalizationMethod::ZScore => {
                let (mean, stddev) = population_stats(values);
                if stddev < SPREAD_EPSILON {
                    MetricScaler::Constant { midpoint }
                } else {
                    MetricScaler::ZScore { mean, stddev }
                }
            }
        };
        Some(scaler)
    }

    /// Apply to an oriented value; the result lies in the method's range.
    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            MetricScaler::MinMax { min, max } => {
                ScoreRange::UNIT.clamp((value - min) / (max - min))
            }
            MetricScaler::ZScore { mean, stddev } => {
                ScoreRange::ZSCORE.clamp((value - mean) / stddev)
            }
            MetricScaler::Constant { midpoint } => midpoint,
        }
    }
}

/// Mean and population standard deviation (N denominator).
fn population_stats(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

fn oriented_value(record: &PlayerRecord, metric: &str, polarity: Polarity) -> Option<f64> {
    record.metric(metric).map(|raw| polarity.orient(raw))
}

/// Normalize every profile metric for every record of one cohort.
///
/// Fails with `InsufficientData` when the cohort is smaller than
/// `min_cohort_size` or a profile metric has no value anywhere in the cohort.
pub fn normalize_cohort<'a>(
    group: &PositionGroup,
    cohort: &[&'a PlayerRecord],
    profile: &'a PositionProfile,
    config: &TierMapConfig,
) -> Result<Vec<NormalizedRecord<'a>>> {
    if cohort.len() < config.min_cohort_size {
        return Err(Error::insufficient_data(format!(
            "position group '{}' has {} player(s), need at least {}",
            group,
            cohort.len(),
            config.min_cohort_size
        )));
    }

    let method = config.normalization;
    let mut columns: Vec<Vec<Option<f64>>> = Vec::with_capacity(profile.metrics.len());

    for metric in &profile.metrics {
        let raw: Vec<Option<f64>> = cohort
            .iter()
            .map(|record| oriented_value(record, &metric.name, metric.polarity))
            .collect();

        if raw.iter().all(Option::is_none) {
            return Err(Error::insufficient_data(format!(
                "metric '{}' is missing for every player in position group '{}'",
                metric.name, group
            )));
        }

        let fit_values: Vec<f64> = match config.missing_metrics {
            MissingMetricPolicy::Zero => raw
                .iter()
                .map(|v| v.unwrap_or_else(|| metric.polarity.orient(0.0)))
                .collect(),
            MissingMetricPolicy::Exclude => raw.iter().flatten().copied().collect(),
        };

        let Some(scaler) = MetricScaler::fit(method, &fit_values) else {
            return Err(Error::insufficient_data(format!(
                "metric '{}' has no values in position group '{}'",
                metric.name, group
            )));
        };
        debug!(group = %group, metric = %metric.name, ?scaler, "fitted scaler");

        let normalized = raw
            .into_iter()
            .map(|value| match (value, config.missing_metrics) {
                (Some(v), _) => Some(scaler.apply(v)),
                (None, MissingMetricPolicy::Zero) => {
                    Some(scaler.apply(metric.polarity.orient(0.0)))
                }
                (None, MissingMetricPolicy::Exclude) => None,
            })
            .collect();
        columns.push(normalized);
    }

    let records = cohort
        .iter()
        .enumerate()
        .map(|(row, &record)| NormalizedRecord {
            record,
            metrics: profile
                .metrics
                .iter()
                .zip(&columns)
                .map(|(metric, column)| NormalizedMetric {
                    name: metric.name.as_str(),
                    value: column[row],
                })
                .collect(),
        })
        .collect();

    Ok(records)
}
