//! Error types shared by every stage of the tier pipeline.
//!
//! The taxonomy mirrors how failures are isolated during a ranking pass:
//!
//! - `Configuration`: invalid weights, thresholds or engine settings. Fatal for
//!   the affected position group (or the whole engine for global settings).
//! - `InsufficientData`: a cohort too small to normalize, or a profile metric
//!   absent from every record of the cohort. The group is omitted.
//! - `InputSchema`: a malformed input row. The row is dropped.
//!
//! Per-group failures are collected into [`GroupFailure`] values so that one
//! group never aborts or corrupts another.

use crate::core::PositionGroup;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Main error type for tiermap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid profile weights, tier thresholds or engine settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cohort too small, or a required metric missing from the whole cohort
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Malformed input row
    #[error("Input schema error in row {row}: {message}")]
    InputSchema { row: usize, message: String },

    /// Two players from different position groups were compared
    #[error("Cannot compare players from different position groups ({left} vs {right})")]
    IncomparableGroups { left: String, right: String },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML configuration parse errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// CSV errors
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::InsufficientData(message.into())
    }

    pub fn input_schema(row: usize, message: impl Into<String>) -> Self {
        Self::InputSchema {
            row,
            message: message.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    /// Stable machine-readable category name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::InsufficientData(_) => "insufficient_data",
            Self::InputSchema { .. } => "input_schema",
            Self::IncomparableGroups { .. } => "incomparable_groups",
            Self::WithContext { .. } => "context",
            Self::Io(_) => "io",
            Self::Toml(_) => "toml",
            Self::Json(_) => "json",
            Self::Csv(_) => "csv",
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData(_))
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

/// A position group whose pipeline failed; its players are absent from the output.
#[derive(Debug)]
pub struct GroupFailure {
    pub group: PositionGroup,
    pub error: Error,
}

impl GroupFailure {
    pub fn new(group: PositionGroup, error: Error) -> Self {
        Self { group, error }
    }
}

impl Serialize for GroupFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GroupFailure", 3)?;
        state.serialize_field("group", &self.group)?;
        state.serialize_field("kind", self.error.kind())?;
        state.serialize_field("message", &self.error.to_string())?;
        state.end()
    }
}

/// An input row dropped at the ingestion boundary.
#[derive(Debug)]
pub struct RowRejection {
    /// Zero-based position of the row in the input batch.
    pub row: usize,
    pub error: Error,
}

impl Serialize for RowRejection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RowRejection", 2)?;
        state.serialize_field("row", &self.row)?;
        state.serialize_field("message", &self.error.to_string())?;
        state.end()
    }
}
