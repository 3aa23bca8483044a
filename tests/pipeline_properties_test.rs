//! Property tests for the normalize -> score -> tier pipeline.

use proptest::prelude::*;
use tiermap::config::TieringKind;
use tiermap::{
    normalize_cohort, MetricWeight, NormalizationMethod, PlayerRecord, PositionGroup,
    PositionProfile, TierEngine, TierMapConfig,
};

fn forward_config() -> TierMapConfig {
    let mut config = TierMapConfig::default();
    config.profiles.clear();
    config.with_profile(
        "Forward",
        PositionProfile::new(vec![
            MetricWeight::new("goals", 0.6),
            MetricWeight::new("assists", 0.4),
        ]),
    )
}

fn cohort(stats: &[(f64, f64)]) -> Vec<PlayerRecord> {
    stats
        .iter()
        .enumerate()
        .map(|(i, (goals, assists))| {
            PlayerRecord::new(format!("Player {i}"), "Club", "Forward")
                .with_metric("goals", *goals)
                .with_metric("assists", *assists)
        })
        .collect()
}

fn stats_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0u32..50, 0u32..30), 3..12).prop_map(|v| {
        v.into_iter()
            .map(|(g, a)| (g as f64, a as f64))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_normalized_values_stay_in_range(
        values in prop::collection::vec(-1000.0f64..1000.0, 3..20),
        zscore in any::<bool>(),
    ) {
        let method = if zscore { NormalizationMethod::ZScore } else { NormalizationMethod::MinMax };
        let config = TierMapConfig { normalization: method, ..forward_config() };
        let profile = PositionProfile::new(vec![MetricWeight::new("goals", 1.0)]);
        let records: Vec<PlayerRecord> = values
            .iter()
            .enumerate()
            .map(|(i, v)| PlayerRecord::new(format!("P{i}"), "Club", "Forward").with_metric("goals", *v))
            .collect();
        let refs: Vec<&PlayerRecord> = records.iter().collect();

        let normalized =
            normalize_cohort(&PositionGroup::new("Forward"), &refs, &profile, &config).unwrap();
        let range = method.range();
        for record in &normalized {
            let value = record.value("goals").unwrap();
            prop_assert!(range.contains(value), "{} outside {:?}", value, range);
        }
    }

    #[test]
    fn prop_scores_and_tiers_are_well_formed(stats in stats_strategy()) {
        let engine = TierEngine::new(forward_config()).unwrap();
        let outcome = engine.rank(&cohort(&stats));

        prop_assert_eq!(outcome.records.len(), stats.len());
        for (index, record) in outcome.records.iter().enumerate() {
            prop_assert!((0.0..=1.0).contains(&record.composite_score));
            prop_assert_eq!(record.group_rank, index + 1);
            prop_assert!(["Elite", "Strong", "Average", "Weak"].contains(&record.tier.as_str()));
        }
    }

    #[test]
    fn prop_ranking_is_deterministic(stats in stats_strategy(), percentile in any::<bool>()) {
        let tiering = if percentile { TieringKind::Percentile } else { TieringKind::Quota };
        let config = TierMapConfig { tiering, ..forward_config() };
        let players = cohort(&stats);

        let first = TierEngine::new(config.clone()).unwrap().rank(&players);
        let second = TierEngine::new(config).unwrap().rank(&players);
        prop_assert_eq!(first.records, second.records);
    }

    #[test]
    fn prop_order_is_by_score_then_name(stats in stats_strategy()) {
        let engine = TierEngine::new(forward_config()).unwrap();
        let outcome = engine.rank(&cohort(&stats));

        for pair in outcome.records.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.composite_score >= b.composite_score);
            if a.composite_score == b.composite_score {
                prop_assert!(a.name < b.name, "{} before {}", a.name, b.name);
            }
            prop_assert!(a.tier_level <= b.tier_level);
        }
    }

    #[test]
    fn prop_more_goals_never_lowers_score(
        stats in stats_strategy(),
        bump in 1u32..20,
        pick in any::<prop::sample::Index>(),
    ) {
        let engine = TierEngine::new(forward_config()).unwrap();
        let target = pick.index(stats.len());
        let name = format!("Player {target}");

        let before = engine.rank(&cohort(&stats));
        let mut improved = stats.clone();
        improved[target].0 += bump as f64;
        let after = engine.rank(&cohort(&improved));

        let old = before.find_player(&name)[0].composite_score;
        let new = after.find_player(&name)[0].composite_score;
        prop_assert!(new >= old, "{} dropped from {} to {}", name, old, new);
    }
}
