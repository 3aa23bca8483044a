//! Ranking engine: runs the normalize, score and tier pipeline for every
//! position group and merges the results into one ordered outcome.
//!
//! Groups share no mutable state. They run on the rayon pool when
//! parallelism is enabled, and the merge happens only after every group has
//! finished, so output never depends on scheduling. A failing group is
//! recorded in [`RankingOutcome::failures`] and the others carry on.

mod outcome;

pub use outcome::RankingOutcome;

use crate::config::{validate_engine_settings, ExecutionPlan, TierMapConfig, TierPolicy};
use crate::core::{PlayerRecord, PositionGroup, ScoredRecord, TieredRecord};
use crate::errors::{Error, GroupFailure, Result};
use crate::ingest::screen_records;
use crate::normalize::normalize_cohort;
use crate::scoring::score_cohort;
use crate::tiers::TierAssigner;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, debug_span, info, warn};

type GroupResult = (PositionGroup, Result<Vec<TieredRecord>>);

/// Tier calculation engine bound to one immutable configuration.
#[derive(Debug, Clone)]
pub struct TierEngine {
    config: TierMapConfig,
    policy: TierPolicy,
}

impl TierEngine {
    /// Build an engine, failing fast when a setting every group depends on
    /// (tier thresholds, cohort size, concurrency) is invalid.
    ///
    /// Profiles are checked per group during [`rank`](Self::rank), so one bad
    /// profile only takes its own group down.
    pub fn new(config: TierMapConfig) -> Result<Self> {
        validate_engine_settings(&config)?;
        let policy = config.tier_policy();
        Ok(Self { config, policy })
    }

    pub fn config(&self) -> &TierMapConfig {
        &self.config
    }

    /// Rank a batch of player records.
    pub fn rank(&self, records: &[PlayerRecord]) -> RankingOutcome {
        let (accepted, rejected) = screen_records(records, &self.config);

        let mut groups: BTreeMap<&PositionGroup, Vec<&PlayerRecord>> = BTreeMap::new();
        for record in accepted {
            groups.entry(&record.position).or_default().push(record);
        }
        debug!(
            groups = groups.len(),
            accepted = records.len() - rejected.len(),
            "grouped records by position"
        );

        let cohorts: Vec<(&PositionGroup, Vec<&PlayerRecord>)> = groups.into_iter().collect();
        let results = self.run_groups(&cohorts);

        let mut ranked = Vec::new();
        let mut failures = Vec::new();
        for (group, result) in results {
            match result {
                Ok(tiered) => ranked.extend(tiered),
                Err(error) => {
                    warn!("Position group '{}' omitted: {}", group, error);
                    failures.push(GroupFailure::new(group, error));
                }
            }
        }

        if self.config.global_rank {
            assign_global_ranks(&mut ranked);
        }

        info!(
            ranked = ranked.len(),
            failed_groups = failures.len(),
            rejected_rows = rejected.len(),
            "ranking pass complete"
        );

        RankingOutcome {
            records: ranked,
            failures,
            rejected,
        }
    }

    fn run_groups(&self, cohorts: &[(&PositionGroup, Vec<&PlayerRecord>)]) -> Vec<GroupResult> {
        let run_one = |(group, cohort): &(&PositionGroup, Vec<&PlayerRecord>)| {
            ((*group).clone(), self.rank_group(group, cohort))
        };

        let plan = self.config.parallel.plan();
        debug!(
            ?plan,
            threads = self.config.parallel.effective_concurrency(),
            "scheduling {} position group(s)",
            cohorts.len()
        );

        match plan {
            ExecutionPlan::Sequential => cohorts.iter().map(run_one).collect(),
            ExecutionPlan::GlobalPool => cohorts.par_iter().map(run_one).collect(),
            ExecutionPlan::Dedicated(threads) => {
                match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                    Ok(pool) => pool.install(|| cohorts.par_iter().map(run_one).collect()),
                    Err(e) => {
                        warn!(
                            "Failed to build a {}-thread pool ({}), ranking groups sequentially",
                            threads, e
                        );
                        cohorts.iter().map(run_one).collect()
                    }
                }
            }
        }
    }

    /// Run the full pipeline for one position-group cohort.
    ///
    /// Records come back sorted by in-group rank, without a global rank.
    pub fn rank_group(
        &self,
        group: &PositionGroup,
        cohort: &[&PlayerRecord],
    ) -> Result<Vec<TieredRecord>> {
        let _span = debug_span!("rank_group", group = %group, players = cohort.len()).entered();

        let profile = self.config.profile(group).ok_or_else(|| {
            Error::configuration(format!("no profile configured for position group '{}'", group))
        })?;
        profile.validate().map_err(|e| match e {
            Error::Configuration(message) => {
                Error::configuration(format!("profile '{}': {}", group, message))
            }
            other => other,
        })?;

        let normalized = normalize_cohort(group, cohort, profile, &self.config)?;
        let mut scored = score_cohort(normalized, profile, self.config.score_range());

        let scores: Vec<f64> = scored.iter().map(|s| s.score).collect();
        let assigner = TierAssigner::for_cohort(&self.policy, &scores)?;
        debug!(cutoffs = ?assigner.cutoffs(), "built tier assigner");

        scored.sort_by(|a, b| a.rank_key().compare(&b.rank_key()));

        Ok(scored
            .into_iter()
            .enumerate()
            .map(|(index, scored)| into_tiered(scored, &assigner, index + 1))
            .collect())
    }
}

fn into_tiered(scored: ScoredRecord<'_>, assigner: &TierAssigner, group_rank: usize) -> TieredRecord {
    let record = scored.record();
    let tier = assigner.assign(scored.score);
    TieredRecord {
        name: record.name.clone(),
        team: record.team.clone(),
        position_group: record.position.clone(),
        season: record.season.clone(),
        composite_score: scored.score,
        tier: tier.label,
        tier_level: tier.level,
        group_rank,
        global_rank: None,
        breakdown: scored.breakdown,
    }
}

/// Rank every record across groups with the same ordering key used in-group.
/// The records themselves stay in group order.
fn assign_global_ranks(records: &mut [TieredRecord]) {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|a, b| records[*a].rank_key().compare(&records[*b].rank_key()));
    for (rank, index) in order.into_iter().enumerate() {
        records[index].global_rank = Some(rank + 1);
    }
}
