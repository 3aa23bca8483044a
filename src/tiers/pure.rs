//! Pure cutoff derivation for cohort-relative tiering policies.
//!
//! Both functions turn a cohort's composite scores into score cutoffs, one
//! per tier, highest tier first. No side effects, fully deterministic.

use std::cmp::Ordering;

fn sorted_ascending(scores: &[f64]) -> Vec<f64> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Score at percentile `p` (0-100) using linear interpolation between the
/// closest ranks of the ascending-sorted scores.
///
/// `sorted` must be non-empty and ascending.
pub fn interpolated_percentile(sorted: &[f64], p: f64) -> f64 {
    let last = sorted.len() - 1;
    let position = (p / 100.0).clamp(0.0, 1.0) * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Score cutoff for each percentile threshold.
pub fn percentile_cutoffs(scores: &[f64], percentiles: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }
    let sorted = sorted_ascending(scores);
    percentiles
        .iter()
        .map(|p| interpolated_percentile(&sorted, *p))
        .collect()
}

/// Split `total` players across bands by share using largest-remainder
/// rounding, so the counts always sum to `total`.
///
/// Equal remainders favour the higher tier.
pub fn quota_counts(total: usize, shares: &[f64]) -> Vec<usize> {
    if shares.is_empty() {
        return Vec::new();
    }

    let exact: Vec<f64> = shares.iter().map(|s| s * total as f64).collect();
    let mut counts: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();

    let mut assigned: usize = counts.iter().sum();
    while assigned > total {
        // Shares summing a hair above 1.0 can overshoot; trim from the bottom.
        if let Some(count) = counts.iter_mut().rev().find(|c| **c > 0) {
            *count -= 1;
        }
        assigned -= 1;
    }

    let mut by_remainder: Vec<usize> = (0..shares.len()).collect();
    by_remainder.sort_by(|a, b| {
        let ra = exact[*a] - exact[*a].floor();
        let rb = exact[*b] - exact[*b].floor();
        rb.partial_cmp(&ra).unwrap_or(Ordering::Equal).then(a.cmp(b))
    });

    for index in by_remainder.iter().cycle().take(total - assigned) {
        counts[*index] += 1;
    }
    counts
}

/// Score cutoff for each quota band: the score of the last player inside the
/// band's cumulative quota. Bands whose cumulative quota is empty get
/// `f64::INFINITY`, so nobody lands in them.
pub fn quota_cutoffs(scores: &[f64], shares: &[f64]) -> Vec<f64> {
    let mut descending = sorted_ascending(scores);
    descending.reverse();

    let mut cumulative = 0;
    quota_counts(scores.len(), shares)
        .into_iter()
        .map(|count| {
            cumulative += count;
            match cumulative {
                0 => f64::INFINITY,
                n => descending[n - 1],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_percentile_interpolates_between_ranks() {
        let sorted = [0.0, 0.25, 0.5, 1.0];
        assert_eq!(interpolated_percentile(&sorted, 0.0), 0.0);
        assert_eq!(interpolated_percentile(&sorted, 100.0), 1.0);
        assert_eq!(interpolated_percentile(&sorted, 50.0), 0.375);
    }

    #[test]
    fn test_percentile_cutoffs_on_unsorted_scores() {
        let cutoffs = percentile_cutoffs(&[0.9, 0.1, 0.5], &[50.0, 0.0]);
        assert_eq!(cutoffs, vec![0.5, 0.1]);
    }

    #[test]
    fn test_percentile_cutoffs_single_score() {
        assert_eq!(percentile_cutoffs(&[0.4], &[90.0, 0.0]), vec![0.4, 0.4]);
    }

    #[test]
    fn test_quota_counts_largest_remainder() {
        // 10 * [0.15, 0.25, 0.35, 0.25] = [1.5, 2.5, 3.5, 2.5]
        assert_eq!(quota_counts(10, &[0.15, 0.25, 0.35, 0.25]), vec![2, 3, 3, 2]);
        assert_eq!(quota_counts(3, &[0.5, 0.5]), vec![2, 1]);
        assert_eq!(quota_counts(0, &[0.5, 0.5]), vec![0, 0]);
    }

    #[test]
    fn test_quota_cutoffs_take_last_score_inside_quota() {
        let cutoffs = quota_cutoffs(&[0.1, 0.9, 0.5, 0.7], &[0.25, 0.5, 0.25]);
        assert_eq!(cutoffs, vec![0.9, 0.5, 0.1]);
    }

    #[test]
    fn test_empty_top_quota_is_unreachable() {
        let cutoffs = quota_cutoffs(&[0.2, 0.8], &[0.1, 0.9]);
        assert_eq!(cutoffs, vec![f64::INFINITY, 0.2]);
    }

    proptest! {
        #[test]
        fn prop_quota_counts_sum_to_total(
            total in 0usize..500,
            raw in proptest::collection::vec(1u32..100, 1..6),
        ) {
            let sum: u32 = raw.iter().sum();
            let shares: Vec<f64> = raw.iter().map(|r| *r as f64 / sum as f64).collect();
            let counts = quota_counts(total, &shares);
            prop_assert_eq!(counts.iter().sum::<usize>(), total);
        }

        #[test]
        fn prop_percentile_cutoffs_are_cohort_scores_bounds(
            scores in proptest::collection::vec(0.0f64..=1.0, 1..50),
            p in 0.0f64..=100.0,
        ) {
            let cutoff = percentile_cutoffs(&scores, &[p])[0];
            let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
            let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(cutoff >= min - 1e-12 && cutoff <= max + 1e-12);
        }
    }
}
