//! How position groups are scheduled during a ranking pass.
//!
//! Groups share no mutable state, so each group's pipeline can run as its own
//! rayon task. Scheduling never changes the output.

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

/// Parallelism settings, the `[parallel]` table of `tiermap.toml`.
///
/// # Example
///
/// ```rust
/// use tiermap::config::{ExecutionPlan, ParallelConfig};
///
/// let config: ParallelConfig = toml::from_str("max_concurrency = 4").unwrap();
/// assert_eq!(config.plan(), ExecutionPlan::Dedicated(4));
/// assert_eq!(ParallelConfig::sequential().plan(), ExecutionPlan::Sequential);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelConfig {
    /// Run groups concurrently (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Size of a dedicated thread pool for the pass. Unset uses rayon's
    /// global pool.
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

/// Where the group pipelines of one pass run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPlan {
    Sequential,
    GlobalPool,
    Dedicated(usize),
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_concurrency: None,
        }
    }
}

impl ParallelConfig {
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            max_concurrency: None,
        }
    }

    pub fn plan(&self) -> ExecutionPlan {
        match (self.enabled, self.max_concurrency) {
            (false, _) => ExecutionPlan::Sequential,
            (true, Some(threads)) => ExecutionPlan::Dedicated(threads),
            (true, None) => ExecutionPlan::GlobalPool,
        }
    }

    /// Worker threads a pass will use.
    pub fn effective_concurrency(&self) -> usize {
        match self.plan() {
            ExecutionPlan::Sequential => 1,
            ExecutionPlan::GlobalPool => rayon::current_num_threads(),
            ExecutionPlan::Dedicated(threads) => threads,
        }
    }

    pub fn validation_error(&self) -> Option<String> {
        (self.max_concurrency == Some(0))
            .then(|| "parallel.max_concurrency must be at least 1".to_string())
    }
}
