//! Records produced by each stage of a ranking pass.
//!
//! `NormalizedRecord` and `ScoredRecord` borrow the input [`PlayerRecord`] for
//! the duration of the pass; only the final [`TieredRecord`] owns its data.

use super::{PlayerRecord, PositionGroup};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Normalized value of one profile metric for one player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedMetric<'a> {
    pub name: &'a str,
    /// `None` when the raw value was missing and missing metrics are excluded.
    pub value: Option<f64>,
}

/// A player with every profile metric rescaled against its position cohort.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedRecord<'a> {
    pub record: &'a PlayerRecord,
    /// One entry per profile metric, in profile order.
    pub metrics: Vec<NormalizedMetric<'a>>,
}

impl<'a> NormalizedRecord<'a> {
    pub fn value(&self, metric: &str) -> Option<f64> {
        self.metrics
            .iter()
            .find(|m| m.name == metric)
            .and_then(|m| m.value)
    }
}

/// How much a single metric added to a composite score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricContribution {
    pub metric: String,
    pub raw: Option<f64>,
    pub normalized: Option<f64>,
    /// Weight actually applied, after re-scaling for excluded metrics.
    pub weight: f64,
    pub contribution: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoredRecord<'a> {
    pub normalized: NormalizedRecord<'a>,
    pub score: f64,
    pub breakdown: Vec<MetricContribution>,
}

impl<'a> ScoredRecord<'a> {
    pub fn record(&self) -> &'a PlayerRecord {
        self.normalized.record
    }

    pub fn rank_key(&self) -> RankKey<'_> {
        let record = self.record();
        RankKey {
            score: self.score,
            name: &record.name,
            team: &record.team,
            season: record.season(),
            position: record.position.as_str(),
        }
    }
}

/// Final output row handed to presentation collaborators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TieredRecord {
    pub name: String,
    pub team: String,
    pub position_group: PositionGroup,
    pub season: Option<String>,
    pub composite_score: f64,
    pub tier: String,
    /// 0 for the highest tier of the policy.
    pub tier_level: usize,
    /// 1-based rank inside the position group.
    pub group_rank: usize,
    /// 1-based rank across every successfully ranked group, when enabled.
    pub global_rank: Option<usize>,
    pub breakdown: Vec<MetricContribution>,
}

impl TieredRecord {
    pub fn rank_key(&self) -> RankKey<'_> {
        RankKey {
            score: self.composite_score,
            name: &self.name,
            team: &self.team,
            season: self.season.as_deref(),
            position: self.position_group.as_str(),
        }
    }

    pub fn contribution(&self, metric: &str) -> Option<&MetricContribution> {
        self.breakdown.iter().find(|c| c.metric == metric)
    }
}

/// Sort key giving a total, reproducible order over ranked players:
/// composite score descending, then name, team, season and position ascending.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankKey<'a> {
    pub score: f64,
    pub name: &'a str,
    pub team: &'a str,
    pub season: Option<&'a str>,
    pub position: &'a str,
}

impl RankKey<'_> {
    pub fn compare(&self, other: &Self) -> Ordering {
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.name.cmp(other.name))
            .then_with(|| self.team.cmp(other.team))
            .then_with(|| self.season.cmp(&other.season))
            .then_with(|| self.position.cmp(other.position))
    }
}
