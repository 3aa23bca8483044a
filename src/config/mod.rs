// Sub-modules
mod core;
mod loader;
mod parallel;
mod profiles;
mod tiers;
pub mod validation;

pub use core::{
    default_global_rank, default_min_cohort_size, MissingMetricPolicy, NormalizationMethod,
    ScoreRange, TierMapConfig, ZSCORE_CLAMP,
};

pub use loader::{
    directory_ancestors, find_config_file, load_config, load_config_from_path, parse_config,
    CONFIG_FILE_NAME,
};

pub use parallel::{ExecutionPlan, ParallelConfig};

pub use profiles::{default_profiles, MetricWeight, Polarity, PositionProfile, WEIGHT_SUM_EPSILON};

pub use tiers::{
    default_fixed_thresholds, default_percentile_thresholds, default_quota_bands, FixedThreshold,
    PercentileThreshold, QuotaBand, ThresholdsConfig, TierPolicy, TieringKind, QUOTA_SUM_EPSILON,
};

pub use validation::{validate_config, validate_config_result, validate_engine_settings};
