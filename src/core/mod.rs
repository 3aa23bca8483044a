pub mod types;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use types::{
    MetricContribution, NormalizedMetric, NormalizedRecord, RankKey, ScoredRecord, TieredRecord,
};

/// Categorical position label that selects the metric profile for a player.
///
/// Groups are compared and ordered by their exact label text, so
/// `"Forward"` and `"forward"` are distinct groups.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionGroup(String);

impl PositionGroup {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PositionGroup {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// One player's season statistics, as handed over by the ingestion boundary.
///
/// A metric mapped to `None` (or absent from the map) is missing; how that is
/// treated depends on the configured [`MissingMetricPolicy`].
///
/// [`MissingMetricPolicy`]: crate::config::MissingMetricPolicy
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub team: String,
    pub position: PositionGroup,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub metrics: BTreeMap<String, Option<f64>>,
}

impl PlayerRecord {
    pub fn new(
        name: impl Into<String>,
        team: impl Into<String>,
        position: impl Into<PositionGroup>,
    ) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
            position: position.into(),
            season: None,
            metrics: BTreeMap::new(),
        }
    }

    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), Some(value));
        self
    }

    pub fn with_missing_metric(mut self, name: impl Into<String>) -> Self {
        self.metrics.insert(name.into(), None);
        self
    }

    /// Raw value of a metric, `None` when missing.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied().flatten()
    }

    pub fn season(&self) -> Option<&str> {
        self.season.as_deref()
    }

    /// Identity used for duplicate detection and deterministic tie-breaking.
    pub fn identity(&self) -> (&str, &str, &PositionGroup, Option<&str>) {
        (&self.name, &self.team, &self.position, self.season())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_lookup_treats_none_and_absent_as_missing() {
        let record = PlayerRecord::new("Pedri", "Barcelona", "Midfielder")
            .with_metric("assists", 9.0)
            .with_missing_metric("goals");

        assert_eq!(record.metric("assists"), Some(9.0));
        assert_eq!(record.metric("goals"), None);
        assert_eq!(record.metric("saves"), None);
    }

    #[test]
    fn test_position_group_orders_by_label() {
        let mut groups = vec![
            PositionGroup::new("Midfielder"),
            PositionGroup::new("Defender"),
            PositionGroup::new("Goalkeeper"),
        ];
        groups.sort();
        let labels: Vec<&str> = groups.iter().map(PositionGroup::as_str).collect();
        assert_eq!(labels, vec!["Defender", "Goalkeeper", "Midfielder"]);
    }

    #[test]
    fn test_record_deserializes_with_optional_fields() {
        let record: PlayerRecord = serde_json::from_str(
            r#"{"name": "Koke", "team": "Atlético Madrid", "position": "Midfielder",
                "metrics": {"assists": 8, "goals": null}}"#,
        )
        .unwrap();

        assert_eq!(record.position, PositionGroup::new("Midfielder"));
        assert_eq!(record.season, None);
        assert_eq!(record.metric("assists"), Some(8.0));
        assert_eq!(record.metric("goals"), None);
    }
}
