//! Player data readers.
//!
//! CSV files carry the identity columns `name`, `team`, `position` and
//! `season`; every other column is a metric and an empty cell is a missing
//! value. JSON files hold an array of rows with a `metrics` object.

use crate::core::PlayerRecord;
use crate::errors::{Error, Result, ResultExt, RowRejection};
use crate::ingest::{convert_rows, RawPlayerRow};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Guess the format from a file extension; anything but `.json` is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }
}

/// Records that passed conversion plus the rows that did not.
pub type LoadedPlayers = (Vec<PlayerRecord>, Vec<RowRejection>);

const REQUIRED_COLUMNS: [&str; 2] = ["name", "position"];

/// Read player rows from CSV. Bad rows are skipped; a missing required
/// column or an unreadable header fails the whole read.
pub fn read_players_csv<R: Read>(rdr: R) -> Result<LoadedPlayers> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.eq_ignore_ascii_case(column)) {
            return Err(Error::input_schema(
                0,
                format!("missing required column '{}'", column),
            ));
        }
    }

    let mut records = Vec::new();
    let mut rejected = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let converted = result
            .map_err(|e| Error::input_schema(row, e.to_string()))
            .and_then(|fields| {
                raw_row(&headers, &fields).map_err(|message| Error::input_schema(row, message))
            })
            .and_then(|raw| raw.into_record(row));
        match converted {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!("Skipping CSV row {}: {}", row, error);
                rejected.push(RowRejection { row, error });
            }
        }
    }

    debug!(
        records = records.len(),
        rejected = rejected.len(),
        "read CSV players"
    );
    Ok((records, rejected))
}

fn raw_row(headers: &[String], fields: &csv::StringRecord) -> std::result::Result<RawPlayerRow, String> {
    let mut raw = RawPlayerRow::default();
    for (header, value) in headers.iter().zip(fields.iter()) {
        match header.to_ascii_lowercase().as_str() {
            "name" => raw.name = value.to_string(),
            "team" => raw.team = value.to_string(),
            "position" => raw.position = value.to_string(),
            "season" => raw.season = Some(value.to_string()),
            _ if value.is_empty() => {
                raw.metrics.insert(header.clone(), None);
            }
            _ => {
                let parsed: f64 = value.parse().map_err(|_| {
                    format!("column '{}' has non-numeric value '{}'", header, value)
                })?;
                raw.metrics.insert(header.clone(), Some(parsed));
            }
        }
    }
    Ok(raw)
}

/// Read player rows from a JSON array.
///
/// Only a document that is not an array of values fails the whole read. An
/// element with the wrong shape (say, a string where a metric number belongs)
/// is rejected on its own.
pub fn read_players_json<R: Read>(rdr: R) -> Result<LoadedPlayers> {
    let values: Vec<serde_json::Value> = serde_json::from_reader(rdr)?;
    let rows = values.into_iter().enumerate().map(|(row, value)| {
        serde_json::from_value::<RawPlayerRow>(value)
            .map_err(|e| Error::input_schema(row, e.to_string()))
    });
    let (records, rejected) = convert_rows(rows);

    debug!(
        records = records.len(),
        rejected = rejected.len(),
        "read JSON players"
    );
    Ok((records, rejected))
}

/// Load players from a file, picking the reader from the extension.
pub fn load_players(path: &Path) -> Result<LoadedPlayers> {
    let file = File::open(path)
        .map_err(Error::from)
        .context(format!("Failed to open {}", path.display()))?;

    let loaded = match InputFormat::from_path(path) {
        InputFormat::Csv => read_players_csv(file),
        InputFormat::Json => read_players_json(file),
    };
    loaded.context(format!("Failed to read players from {}", path.display()))
}
