// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod ingest;
pub mod io;
pub mod normalize;
pub mod ranking;
pub mod scoring;
pub mod tiers;

// Re-export commonly used types
pub use crate::core::{
    MetricContribution, NormalizedRecord, PlayerRecord, PositionGroup, RankKey, ScoredRecord,
    TieredRecord,
};

pub use crate::config::{
    load_config, parse_config, MetricWeight, MissingMetricPolicy, NormalizationMethod, Polarity,
    PositionProfile, TierMapConfig, TierPolicy, TieringKind,
};

pub use crate::errors::{Error, GroupFailure, Result, RowRejection};

pub use crate::normalize::{normalize_cohort, MetricScaler};
pub use crate::scoring::{score_cohort, score_record};
pub use crate::tiers::{Tier, TierAssigner};
pub use crate::ranking::{RankingOutcome, TierEngine};

pub use crate::analysis::{
    compare_players, summarize_squad, summarize_tiers, PlayerComparison, SquadSummary, TierSummary,
};
pub use crate::ingest::{screen_records, RawPlayerRow};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
