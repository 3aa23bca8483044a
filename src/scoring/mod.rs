//! Composite scoring: the weighted sum of a player's normalized metrics.
//!
//! Summation follows profile order so a score is reproducible bit for bit.
//! Metrics without a normalized value (missing under the `exclude` policy)
//! are skipped and the remaining weights are re-scaled to sum to one.

use crate::config::{PositionProfile, ScoreRange};
use crate::core::{MetricContribution, NormalizedRecord, ScoredRecord};

/// Score a single normalized record against its position profile.
///
/// The result is clamped to `range`. A record with no usable weight at all
/// scores the range midpoint.
pub fn score_record<'a>(
    normalized: NormalizedRecord<'a>,
    profile: &PositionProfile,
    range: ScoreRange,
) -> ScoredRecord<'a> {
    let values: Vec<Option<f64>> = profile
        .metrics
        .iter()
        .map(|metric| normalized.value(&metric.name))
        .collect();

    let used_weight: f64 = profile
        .metrics
        .iter()
        .zip(&values)
        .filter(|(_, value)| value.is_some())
        .map(|(metric, _)| metric.weight)
        .sum();
    let any_excluded = values.iter().any(Option::is_none);

    let scale = if !any_excluded {
        1.0
    } else if used_weight > 0.0 {
        1.0 / used_weight
    } else {
        0.0
    };

    let breakdown: Vec<MetricContribution> = profile
        .metrics
        .iter()
        .zip(&values)
        .map(|(metric, value)| {
            let weight = if value.is_some() {
                metric.weight * scale
            } else {
                0.0
            };
            MetricContribution {
                metric: metric.name.clone(),
                raw: normalized.record.metric(&metric.name),
                normalized: *value,
                weight,
                contribution: value.map_or(0.0, |v| weight * v),
            }
        })
        .collect();

    let score = if any_excluded && used_weight <= 0.0 {
        range.midpoint()
    } else {
        range.clamp(breakdown.iter().map(|c| c.contribution).sum())
    };

    ScoredRecord {
        normalized,
        score,
        breakdown,
    }
}

/// Score every record of a normalized cohort, preserving input order.
pub fn score_cohort<'a>(
    cohort: Vec<NormalizedRecord<'a>>,
    profile: &PositionProfile,
    range: ScoreRange,
) -> Vec<ScoredRecord<'a>> {
    cohort
        .into_iter()
        .map(|record| score_record(record, profile, range))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetricWeight;
    use crate::core::{NormalizedMetric, PlayerRecord};

    fn profile() -> PositionProfile {
        PositionProfile::new(vec![
            MetricWeight::new("goals", 0.6),
            MetricWeight::new("assists", 0.4),
        ])
    }

    fn normalized<'a>(
        record: &'a PlayerRecord,
        profile: &'a PositionProfile,
        values: &[Option<f64>],
    ) -> NormalizedRecord<'a> {
        NormalizedRecord {
            record,
            metrics: profile
                .metrics
                .iter()
                .zip(values)
                .map(|(m, v)| NormalizedMetric {
                    name: m.name.as_str(),
                    value: *v,
                })
                .collect(),
        }
    }

    #[test]
    fn test_all_ones_score_one_and_all_zeros_score_zero() {
        let record = PlayerRecord::new("Oyarzabal", "Real Sociedad", "Forward");
        let profile = profile();

        let top = score_record(
            normalized(&record, &profile, &[Some(1.0), Some(1.0)]),
            &profile,
            ScoreRange::UNIT,
        );
        assert!((top.score - 1.0).abs() < 1e-9);

        let bottom = score_record(
            normalized(&record, &profile, &[Some(0.0), Some(0.0)]),
            &profile,
            ScoreRange::UNIT,
        );
        assert_eq!(bottom.score, 0.0);
    }

    #[test]
    fn test_weighted_sum_and_breakdown() {
        let record = PlayerRecord::new("Oyarzabal", "Real Sociedad", "Forward")
            .with_metric("goals", 14.0)
            .with_metric("assists", 6.0);
        let profile = profile();

        let scored = score_record(
            normalized(&record, &profile, &[Some(0.5), Some(1.0)]),
            &profile,
            ScoreRange::UNIT,
        );

        assert!((scored.score - 0.7).abs() < 1e-12);
        assert_eq!(scored.breakdown.len(), 2);
        assert_eq!(scored.breakdown[0].metric, "goals");
        assert_eq!(scored.breakdown[0].raw, Some(14.0));
        assert!((scored.breakdown[0].contribution - 0.3).abs() < 1e-12);
        assert!((scored.breakdown[1].contribution - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_excluded_metric_rescales_remaining_weights() {
        let record = PlayerRecord::new("Lewandowski", "Barcelona", "Forward");
        let profile = profile();

        let scored = score_record(
            normalized(&record, &profile, &[None, Some(0.5)]),
            &profile,
            ScoreRange::UNIT,
        );

        assert!((scored.score - 0.5).abs() < 1e-12);
        assert_eq!(scored.breakdown[0].weight, 0.0);
        assert_eq!(scored.breakdown[0].contribution, 0.0);
        assert!((scored.breakdown[1].weight - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_usable_weight_scores_midpoint() {
        let record = PlayerRecord::new("Unknown", "Club", "Forward");
        let profile = profile();

        let scored = score_record(
            normalized(&record, &profile, &[None, None]),
            &profile,
            ScoreRange::ZSCORE,
        );
        assert_eq!(scored.score, 0.0);
    }

    #[test]
    fn test_score_cohort_keeps_order() {
        let a = PlayerRecord::new("A", "Club", "Forward");
        let b = PlayerRecord::new("B", "Club", "Forward");
        let profile = profile();

        let scored = score_cohort(
            vec![
                normalized(&a, &profile, &[Some(0.0), Some(0.0)]),
                normalized(&b, &profile, &[Some(1.0), Some(1.0)]),
            ],
            &profile,
            ScoreRange::UNIT,
        );
        let names: Vec<&str> = scored.iter().map(|s| s.record().name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
