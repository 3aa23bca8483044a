//! Ingestion boundary: untyped rows in, strongly-typed [`PlayerRecord`]s out.
//!
//! Malformed rows never reach the pipeline. Each one becomes a
//! [`RowRejection`] carrying an `InputSchema` error and the batch carries on.

use crate::config::{MissingMetricPolicy, TierMapConfig};
use crate::core::{PlayerRecord, PositionGroup};
use crate::errors::{Error, Result, RowRejection};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// A row as it arrives from a file, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPlayerRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub metrics: BTreeMap<String, Option<f64>>,
}

impl RawPlayerRow {
    /// Validate the row and convert it into a [`PlayerRecord`].
    ///
    /// Identity fields are trimmed and an empty season becomes `None`.
    pub fn into_record(self, row: usize) -> Result<PlayerRecord> {
        let season = self
            .season
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let record = PlayerRecord {
            name: self.name.trim().to_string(),
            team: self.team.trim().to_string(),
            position: PositionGroup::new(self.position.trim()),
            season,
            metrics: self.metrics,
        };
        check_record(&record).map_err(|message| Error::input_schema(row, message))?;
        Ok(record)
    }
}

/// Structural problems that make a record unusable, independent of config.
fn check_record(record: &PlayerRecord) -> std::result::Result<(), String> {
    if record.name.trim().is_empty() {
        return Err("empty player name".to_string());
    }
    if record.position.as_str().trim().is_empty() {
        return Err(format!("player '{}' has no position group", record.name));
    }
    if let Some((metric, value)) = record
        .metrics
        .iter()
        .find_map(|(metric, value)| match value {
            Some(v) if !v.is_finite() => Some((metric, *v)),
            _ => None,
        })
    {
        return Err(format!(
            "player '{}' has non-finite value {} for metric '{}'",
            record.name, value, metric
        ));
    }
    Ok(())
}

/// Convert a batch of rows, collecting rejections instead of failing.
///
/// A row that could not even be decoded arrives as an `Err` and is rejected
/// at its position like any other bad row.
pub fn convert_rows<I>(rows: I) -> (Vec<PlayerRecord>, Vec<RowRejection>)
where
    I: IntoIterator<Item = Result<RawPlayerRow>>,
{
    let mut records = Vec::new();
    let mut rejected = Vec::new();

    for (row, raw) in rows.into_iter().enumerate() {
        match raw.and_then(|raw| raw.into_record(row)) {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!("Skipping input row {}: {}", row, error);
                rejected.push(RowRejection { row, error });
            }
        }
    }
    (records, rejected)
}

/// Screen records before a ranking pass.
///
/// Drops records with an empty name or position, a non-finite metric, an
/// identity already seen earlier in the batch, or (under the `exclude`
/// policy) no value for any metric of their group's profile.
pub fn screen_records<'a>(
    records: &'a [PlayerRecord],
    config: &TierMapConfig,
) -> (Vec<&'a PlayerRecord>, Vec<RowRejection>) {
    let mut accepted = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    let mut seen = HashSet::new();

    for (row, record) in records.iter().enumerate() {
        let verdict = check_record(record).and_then(|()| {
            if !seen.insert(record.identity()) {
                return Err(format!(
                    "duplicate player '{}' ({}, {})",
                    record.name, record.team, record.position
                ));
            }
            if config.missing_metrics == MissingMetricPolicy::Exclude {
                if let Some(profile) = config.profile(&record.position) {
                    if profile.metric_names().all(|m| record.metric(m).is_none()) {
                        return Err(format!(
                            "player '{}' has no value for any {} metric",
                            record.name, record.position
                        ));
                    }
                }
            }
            Ok(())
        });

        match verdict {
            Ok(()) => accepted.push(record),
            Err(message) => {
                let error = Error::input_schema(row, message);
                warn!("Dropping record: {}", error);
                rejected.push(RowRejection { row, error });
            }
        }
    }
    (accepted, rejected)
}
