use crate::core::{PositionGroup, TieredRecord};
use crate::errors::{GroupFailure, RowRejection};
use serde::Serialize;

/// Result of a ranking pass.
///
/// `records` are ordered by position group, then in-group rank. Groups that
/// failed have no records and one entry in `failures`; rows dropped at the
/// input boundary are listed in `rejected`.
#[derive(Debug, Default, Serialize)]
pub struct RankingOutcome {
    pub records: Vec<TieredRecord>,
    pub failures: Vec<GroupFailure>,
    pub rejected: Vec<RowRejection>,
}

impl RankingOutcome {
    /// Successfully ranked groups, in output order.
    pub fn groups(&self) -> Vec<&PositionGroup> {
        let mut groups: Vec<&PositionGroup> = Vec::new();
        for record in &self.records {
            if groups.last() != Some(&&record.position_group) {
                groups.push(&record.position_group);
            }
        }
        groups
    }

    pub fn records_in_group<'a>(
        &'a self,
        group: &'a PositionGroup,
    ) -> impl Iterator<Item = &'a TieredRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| &record.position_group == group)
    }

    /// The `n` best-ranked players of a group.
    pub fn top_in_group(&self, group: &PositionGroup, n: usize) -> Vec<&TieredRecord> {
        self.records
            .iter()
            .filter(|record| &record.position_group == group)
            .take(n)
            .collect()
    }

    /// Every record ordered by global rank. Records without a global rank
    /// (global ranking disabled) follow the same ordering key.
    pub fn by_global_rank(&self) -> Vec<&TieredRecord> {
        let mut records: Vec<&TieredRecord> = self.records.iter().collect();
        records.sort_by(|a, b| match (a.global_rank, b.global_rank) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => a.rank_key().compare(&b.rank_key()),
        });
        records
    }

    /// Records for a player name across groups and seasons.
    pub fn find_player(&self, name: &str) -> Vec<&TieredRecord> {
        self.records.iter().filter(|r| r.name == name).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.rejected.is_empty()
    }

    /// Restrict the outcome to one group and/or the top `n` players per group.
    ///
    /// Ranks are kept from the full pass. Rejected rows are kept as they are.
    pub fn into_filtered(self, group: Option<&PositionGroup>, top: Option<usize>) -> Self {
        let mut taken_in_group = 0;
        let mut current: Option<PositionGroup> = None;

        let records = self
            .records
            .into_iter()
            .filter(|record| group.is_none_or(|g| &record.position_group == g))
            .filter(|record| {
                if current.as_ref() != Some(&record.position_group) {
                    current = Some(record.position_group.clone());
                    taken_in_group = 0;
                }
                taken_in_group += 1;
                top.is_none_or(|n| taken_in_group <= n)
            })
            .collect();

        let failures = self
            .failures
            .into_iter()
            .filter(|failure| group.is_none_or(|g| &failure.group == g))
            .collect();

        Self {
            records,
            failures,
            rejected: self.rejected,
        }
    }
}
