use crate::analysis::{summarize_tiers, TierSummary};
use crate::core::{PositionGroup, TieredRecord};
use crate::ranking::RankingOutcome;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Terminal,
}

pub trait OutputWriter {
    fn write_outcome(&mut self, outcome: &RankingOutcome) -> anyhow::Result<()>;
}

/// One output row with the stable column schema shared by every consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierRow<'a> {
    pub name: &'a str,
    pub team: &'a str,
    pub position_group: &'a str,
    pub season: Option<&'a str>,
    pub composite_score: f64,
    pub tier: &'a str,
    pub group_rank: usize,
    pub global_rank: Option<usize>,
}

impl<'a> From<&'a TieredRecord> for TierRow<'a> {
    fn from(record: &'a TieredRecord) -> Self {
        Self {
            name: &record.name,
            team: &record.team,
            position_group: record.position_group.as_str(),
            season: record.season.as_deref(),
            composite_score: record.composite_score,
            tier: &record.tier,
            group_rank: record.group_rank,
            global_rank: record.global_rank,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    outcome: &'a RankingOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Vec<TierSummary>>,
}

pub struct JsonWriter<W: Write> {
    writer: W,
    include_summary: bool,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            include_summary: false,
        }
    }

    pub fn with_summary(mut self, include_summary: bool) -> Self {
        self.include_summary = include_summary;
        self
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_outcome(&mut self, outcome: &RankingOutcome) -> anyhow::Result<()> {
        let report = JsonReport {
            outcome,
            summary: self
                .include_summary
                .then(|| summarize_tiers(&outcome.records)),
        };
        let json = serde_json::to_string_pretty(&report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the stable row schema only; failures and summaries have no CSV form.
pub struct CsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for CsvWriter<W> {
    fn write_outcome(&mut self, outcome: &RankingOutcome) -> anyhow::Result<()> {
        let mut csv = csv::Writer::from_writer(&mut self.writer);
        if outcome.records.is_empty() {
            csv.write_record([
                "name",
                "team",
                "position_group",
                "season",
                "composite_score",
                "tier",
                "group_rank",
                "global_rank",
            ])?;
        }
        for record in &outcome.records {
            csv.serialize(TierRow::from(record))?;
        }
        csv.flush()?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    include_summary: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            include_summary: false,
        }
    }

    pub fn with_summary(mut self, include_summary: bool) -> Self {
        self.include_summary = include_summary;
        self
    }

    fn write_group(&mut self, group: &PositionGroup, outcome: &RankingOutcome) -> anyhow::Result<()> {
        let mut table = new_table(&["Rank", "Player", "Team", "Season", "Score", "Tier", "Overall"]);
        let mut players = 0;
        for record in outcome.records_in_group(group) {
            players += 1;
            table.add_row(vec![
                Cell::new(record.group_rank).set_alignment(CellAlignment::Right),
                Cell::new(&record.name),
                Cell::new(&record.team),
                Cell::new(record.season.as_deref().unwrap_or("-")),
                Cell::new(format!("{:.3}", record.composite_score))
                    .set_alignment(CellAlignment::Right),
                Cell::new(&record.tier),
                Cell::new(
                    record
                        .global_rank
                        .map_or_else(|| "-".to_string(), |rank| rank.to_string()),
                )
                .set_alignment(CellAlignment::Right),
            ]);
        }

        writeln!(self.writer, "{} ({} players)", group, players)?;
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, outcome: &RankingOutcome) -> anyhow::Result<()> {
        let summaries = summarize_tiers(&outcome.records);
        if summaries.is_empty() {
            return Ok(());
        }

        let mut table = new_table(&["Group", "Tier", "Players", "Mean", "Min", "Max", "Metric means"]);
        for summary in &summaries {
            let metric_means: Vec<String> = summary
                .metric_means
                .iter()
                .map(|(metric, mean)| format!("{metric}={mean:.2}"))
                .collect();
            table.add_row(vec![
                Cell::new(&summary.position_group),
                Cell::new(&summary.tier),
                Cell::new(summary.players).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3}", summary.mean_score)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3}", summary.min_score)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3}", summary.max_score)).set_alignment(CellAlignment::Right),
                Cell::new(metric_means.join(", ")),
            ]);
        }

        writeln!(self.writer, "Tier summary")?;
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_problems(&mut self, outcome: &RankingOutcome) -> anyhow::Result<()> {
        for failure in &outcome.failures {
            writeln!(self.writer, "Skipped {}: {}", failure.group, failure.error)?;
        }
        if !outcome.rejected.is_empty() {
            writeln!(
                self.writer,
                "{} input row(s) rejected (run with -v for details)",
                outcome.rejected.len()
            )?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_outcome(&mut self, outcome: &RankingOutcome) -> anyhow::Result<()> {
        if outcome.records.is_empty() {
            writeln!(self.writer, "No players ranked.")?;
        }
        for group in outcome.groups() {
            self.write_group(group, outcome)?;
        }
        if self.include_summary {
            self.write_summary(outcome)?;
        }
        self.write_problems(outcome)?;
        self.writer.flush()?;
        Ok(())
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

pub fn create_writer(
    format: OutputFormat,
    writer: Box<dyn Write>,
    include_summary: bool,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer).with_summary(include_summary)),
        OutputFormat::Csv => Box::new(CsvWriter::new(writer)),
        OutputFormat::Terminal => {
            Box::new(TerminalWriter::new(writer).with_summary(include_summary))
        }
    }
}
