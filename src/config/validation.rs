//! Validation with error accumulation for configuration.
//!
//! `validate_config` collects ALL problems instead of stopping at the first,
//! so `tiermap validate` can show every issue in one run. The engine itself
//! only needs the global settings to be sound (`validate_engine_settings`);
//! a bad profile is reported against its own position group at ranking time.

use super::TierMapConfig;
use crate::errors::{Error, Result};

/// Validate entire config, accumulating ALL errors.
///
/// # Example
///
/// ```rust
/// use tiermap::config::{validate_config, TierMapConfig};
///
/// assert!(validate_config(&TierMapConfig::default()).is_ok());
/// ```
pub fn validate_config(config: &TierMapConfig) -> std::result::Result<(), Vec<Error>> {
    let mut errors = engine_setting_errors(config);

    if config.profiles.is_empty() {
        errors.push(Error::configuration("no position profiles configured"));
    }

    for (group, profile) in &config.profiles {
        errors.extend(
            profile
                .validation_errors()
                .into_iter()
                .map(|message| Error::configuration(format!("profile '{}': {}", group, message))),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate config with a fail-fast `Result` API.
///
/// All accumulated problems are folded into a single `Configuration` error.
pub fn validate_config_result(config: &TierMapConfig) -> Result<()> {
    validate_config(config).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(describe).collect();
        Error::configuration(messages.join("; "))
    })
}

/// Validate the settings every position group depends on.
pub fn validate_engine_settings(config: &TierMapConfig) -> Result<()> {
    match engine_setting_errors(config).into_iter().next() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

fn engine_setting_errors(config: &TierMapConfig) -> Vec<Error> {
    let mut errors = Vec::new();

    if config.min_cohort_size == 0 {
        errors.push(Error::configuration("min_cohort_size must be at least 1"));
    }

    if let Some(message) = config.parallel.validation_error() {
        errors.push(Error::configuration(message));
    }

    if let Err(error) = config.tier_policy().validate(config.score_range()) {
        errors.push(error);
    }

    errors
}

fn describe(error: &Error) -> String {
    match error {
        Error::Configuration(message) => message.clone(),
        other => other.to_string(),
    }
}
