//! Tier assignment for composite scores
//!
//! Every policy is reduced to one score cutoff per tier, highest tier first.
//! A score lands in the first tier whose cutoff it meets or exceeds, so ties
//! at a boundary resolve to the higher tier.
//!
//! ```rust
//! use tiermap::config::{default_fixed_thresholds, TierPolicy};
//! use tiermap::tiers::TierAssigner;
//!
//! let policy = TierPolicy::Fixed(default_fixed_thresholds());
//! let assigner = TierAssigner::for_cohort(&policy, &[]).unwrap();
//! assert_eq!(assigner.assign(0.80).label, "Elite");
//! assert_eq!(assigner.assign(0.79).label, "Strong");
//! ```

pub mod pure;

use crate::config::TierPolicy;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// A tier label together with its position in the policy (0 = highest).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub label: String,
    pub level: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct Band {
    cutoff: f64,
    label: String,
}

/// Maps composite scores to tiers for one position-group cohort.
#[derive(Debug, Clone, PartialEq)]
pub struct TierAssigner {
    bands: Vec<Band>,
}

impl TierAssigner {
    /// Build the assigner for a cohort.
    ///
    /// Fixed policies ignore `scores`. Percentile and quota policies derive
    /// their cutoffs from them, so the whole cohort must be scored first.
    pub fn for_cohort(policy: &TierPolicy, scores: &[f64]) -> Result<Self> {
        let labels: Vec<String> = policy.labels().into_iter().map(String::from).collect();
        if labels.is_empty() {
            return Err(Error::configuration(format!(
                "{:?} tiering needs at least one tier",
                policy.kind()
            )));
        }
        if policy.is_cohort_relative() && scores.is_empty() {
            return Err(Error::insufficient_data(format!(
                "{:?} tiering needs at least one scored player",
                policy.kind()
            )));
        }

        let cutoffs = match policy {
            TierPolicy::Fixed(list) => list.iter().map(|t| t.lower_bound).collect(),
            TierPolicy::Percentile(list) => {
                let percentiles: Vec<f64> = list.iter().map(|t| t.percentile).collect();
                pure::percentile_cutoffs(scores, &percentiles)
            }
            TierPolicy::Quota(list) => {
                let shares: Vec<f64> = list.iter().map(|b| b.share).collect();
                pure::quota_cutoffs(scores, &shares)
            }
        };

        let bands = cutoffs
            .into_iter()
            .zip(labels)
            .map(|(cutoff, label)| Band { cutoff, label })
            .collect();
        Ok(Self { bands })
    }

    /// Tier for a score. Scores below every cutoff fall into the lowest tier.
    pub fn assign(&self, score: f64) -> Tier {
        let level = self
            .bands
            .iter()
            .position(|band| score >= band.cutoff)
            .unwrap_or(self.bands.len() - 1);
        Tier {
            label: self.bands[level].label.clone(),
            level,
        }
    }

    /// Score cutoffs, highest tier first.
    pub fn cutoffs(&self) -> Vec<(&str, f64)> {
        self.bands
            .iter()
            .map(|band| (band.label.as_str(), band.cutoff))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FixedThreshold, PercentileThreshold, QuotaBand};

    fn fixed(bounds: &[(f64, &str)]) -> TierPolicy {
        TierPolicy::Fixed(
            bounds
                .iter()
                .map(|(lower_bound, label)| FixedThreshold {
                    lower_bound: *lower_bound,
                    label: label.to_string(),
                })
                .collect(),
        )
    }

    fn labels(assigner: &TierAssigner, scores: &[f64]) -> Vec<String> {
        scores.iter().map(|s| assigner.assign(*s).label).collect()
    }

    #[test]
    fn test_fixed_thresholds_are_inclusive() {
        let policy = fixed(&[(0.8, "Elite"), (0.4, "Strong"), (0.0, "Average")]);
        let assigner = TierAssigner::for_cohort(&policy, &[]).unwrap();

        assert_eq!(
            labels(&assigner, &[1.0, 0.8, 0.5, 0.4, 0.0]),
            vec!["Elite", "Elite", "Strong", "Strong", "Average"]
        );
        assert_eq!(assigner.assign(0.8).level, 0);
        assert_eq!(assigner.assign(0.0).level, 2);
    }

    #[test]
    fn test_percentile_policy_uses_cohort_distribution() {
        let policy = TierPolicy::Percentile(vec![
            PercentileThreshold {
                percentile: 75.0,
                label: "Top".into(),
            },
            PercentileThreshold {
                percentile: 0.0,
                label: "Rest".into(),
            },
        ]);
        let scores = [0.2, 0.4, 0.6, 0.8, 1.0];
        let assigner = TierAssigner::for_cohort(&policy, &scores).unwrap();

        // 75th percentile of five evenly spaced scores is exactly the 4th.
        assert_eq!(
            labels(&assigner, &scores),
            vec!["Rest", "Rest", "Rest", "Top", "Top"]
        );
    }

    #[test]
    fn test_quota_ties_at_boundary_promote() {
        let policy = TierPolicy::Quota(vec![
            QuotaBand {
                share: 0.25,
                label: "Top".into(),
            },
            QuotaBand {
                share: 0.75,
                label: "Rest".into(),
            },
        ]);
        let scores = [0.9, 0.9, 0.5, 0.1];
        let assigner = TierAssigner::for_cohort(&policy, &scores).unwrap();
        assert_eq!(labels(&assigner, &scores), vec!["Top", "Top", "Rest", "Rest"]);
    }

    #[test]
    fn test_cohort_relative_policy_needs_scores() {
        let policy = TierPolicy::Quota(vec![QuotaBand {
            share: 1.0,
            label: "All".into(),
        }]);
        let err = TierAssigner::for_cohort(&policy, &[]).unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_empty_policy_is_configuration_error() {
        let err = TierAssigner::for_cohort(&TierPolicy::Fixed(vec![]), &[0.5]).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_cutoffs_report_labels_in_order() {
        let policy = fixed(&[(0.5, "Upper"), (0.0, "Lower")]);
        let assigner = TierAssigner::for_cohort(&policy, &[]).unwrap();
        assert_eq!(assigner.cutoffs(), vec![("Upper", 0.5), ("Lower", 0.0)]);
    }
}
