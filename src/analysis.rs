//! Read-only views over a ranked result set: per-tier summaries, team squad
//! breakdowns and head-to-head player comparison.

use crate::core::{PositionGroup, TieredRecord};
use crate::errors::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Score difference below which two players are considered level.
const DRAW_EPSILON: f64 = 1e-9;

/// Aggregate figures for one tier of one position group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierSummary {
    pub position_group: PositionGroup,
    pub tier: String,
    pub tier_level: usize,
    pub players: usize,
    pub mean_score: f64,
    pub min_score: f64,
    pub max_score: f64,
    /// Mean raw value of each profile metric over players that have it.
    pub metric_means: BTreeMap<String, f64>,
}

#[derive(Default)]
struct Accumulator<'a> {
    tier: &'a str,
    scores: Vec<f64>,
    metrics: BTreeMap<&'a str, (f64, usize)>,
}

/// Summarize every populated tier, ordered by position group then tier level.
pub fn summarize_tiers(records: &[TieredRecord]) -> Vec<TierSummary> {
    let mut buckets: BTreeMap<(&PositionGroup, usize), Accumulator<'_>> = BTreeMap::new();

    for record in records {
        let bucket = buckets
            .entry((&record.position_group, record.tier_level))
            .or_default();
        bucket.tier = &record.tier;
        bucket.scores.push(record.composite_score);
        for contribution in &record.breakdown {
            if let Some(raw) = contribution.raw {
                let entry = bucket.metrics.entry(&contribution.metric).or_insert((0.0, 0));
                entry.0 += raw;
                entry.1 += 1;
            }
        }
    }

    buckets
        .into_iter()
        .map(|((group, tier_level), bucket)| {
            let players = bucket.scores.len();
            TierSummary {
                position_group: group.clone(),
                tier: bucket.tier.to_string(),
                tier_level,
                players,
                mean_score: bucket.scores.iter().sum::<f64>() / players as f64,
                min_score: bucket.scores.iter().copied().fold(f64::INFINITY, f64::min),
                max_score: bucket.scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                metric_means: bucket
                    .metrics
                    .into_iter()
                    .map(|(metric, (sum, count))| (metric.to_string(), sum / count as f64))
                    .collect(),
            }
        })
        .collect()
}

/// Best-ranked squad member of one position group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPerformer {
    pub name: String,
    pub composite_score: f64,
    pub tier: String,
    pub group_rank: usize,
}

/// One position group of a team's squad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionBreakdown {
    pub position_group: PositionGroup,
    pub players: usize,
    /// Sum of each profile metric's raw value over the squad's players.
    pub metric_totals: BTreeMap<String, f64>,
    pub top_performer: Option<TopPerformer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquadSummary {
    pub team: String,
    pub squad_size: usize,
    /// Ordered by position group.
    pub positions: Vec<PositionBreakdown>,
}

/// Break one team's ranked players down by position group.
///
/// Team names match exactly after trimming. The top performer of a group is
/// the squad member with the lowest in-group rank, so it agrees with the
/// ranking even when composite scores tie.
pub fn summarize_squad(records: &[TieredRecord], team: &str) -> SquadSummary {
    let team = team.trim();
    let mut groups: BTreeMap<&PositionGroup, Vec<&TieredRecord>> = BTreeMap::new();
    for record in records.iter().filter(|r| r.team == team) {
        groups.entry(&record.position_group).or_default().push(record);
    }

    let positions: Vec<PositionBreakdown> = groups
        .into_iter()
        .map(|(group, members)| {
            let mut metric_totals: BTreeMap<String, f64> = BTreeMap::new();
            for contribution in members.iter().flat_map(|r| &r.breakdown) {
                if let Some(raw) = contribution.raw {
                    *metric_totals.entry(contribution.metric.clone()).or_insert(0.0) += raw;
                }
            }
            let top_performer = members
                .iter()
                .min_by_key(|r| r.group_rank)
                .map(|r| TopPerformer {
                    name: r.name.clone(),
                    composite_score: r.composite_score,
                    tier: r.tier.clone(),
                    group_rank: r.group_rank,
                });

            PositionBreakdown {
                position_group: group.clone(),
                players: members.len(),
                metric_totals,
                top_performer,
            }
        })
        .collect();

    SquadSummary {
        team: team.to_string(),
        squad_size: positions.iter().map(|p| p.players).sum(),
        positions,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Left,
    Right,
    Draw,
}

/// Per-metric difference between two compared players.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDelta {
    pub metric: String,
    pub left_raw: Option<f64>,
    pub right_raw: Option<f64>,
    /// Left contribution minus right contribution.
    pub contribution_gap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerComparison {
    pub position_group: PositionGroup,
    pub left: String,
    pub right: String,
    pub verdict: Verdict,
    /// Left composite score minus right composite score.
    pub score_gap: f64,
    /// Largest absolute contribution gap first.
    pub deltas: Vec<MetricDelta>,
}

impl PlayerComparison {
    /// Name of the winning player, `None` on a draw.
    pub fn winner(&self) -> Option<&str> {
        match self.verdict {
            Verdict::Left => Some(&self.left),
            Verdict::Right => Some(&self.right),
            Verdict::Draw => None,
        }
    }
}

/// Compare two ranked players of the same position group.
pub fn compare_players(left: &TieredRecord, right: &TieredRecord) -> Result<PlayerComparison> {
    if left.position_group != right.position_group {
        return Err(Error::IncomparableGroups {
            left: left.position_group.to_string(),
            right: right.position_group.to_string(),
        });
    }

    let score_gap = left.composite_score - right.composite_score;
    let verdict = if score_gap.abs() < DRAW_EPSILON {
        Verdict::Draw
    } else if score_gap > 0.0 {
        Verdict::Left
    } else {
        Verdict::Right
    };

    let mut deltas: Vec<MetricDelta> = left
        .breakdown
        .iter()
        .map(|l| {
            let r = right.contribution(&l.metric);
            MetricDelta {
                metric: l.metric.clone(),
                left_raw: l.raw,
                right_raw: r.and_then(|c| c.raw),
                contribution_gap: l.contribution - r.map_or(0.0, |c| c.contribution),
            }
        })
        .collect();
    deltas.sort_by(|a, b| {
        b.contribution_gap
            .abs()
            .partial_cmp(&a.contribution_gap.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.metric.cmp(&b.metric))
    });

    Ok(PlayerComparison {
        position_group: left.position_group.clone(),
        left: left.name.clone(),
        right: right.name.clone(),
        verdict,
        score_gap,
        deltas,
    })
}
