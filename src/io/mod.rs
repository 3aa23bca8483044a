pub mod input;
pub mod output;

pub use input::{load_players, read_players_csv, read_players_json, InputFormat, LoadedPlayers};
pub use output::{create_writer, OutputFormat, OutputWriter, TierRow};

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Destination for rendered output: the given file, or stdout.
pub fn open_destination(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}
