use super::rank::run_ranking;
use crate::analysis::{summarize_squad, SquadSummary};
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

pub struct SquadConfig {
    pub input: PathBuf,
    pub team: String,
    pub config: Option<PathBuf>,
    pub json: bool,
}

pub fn handle_squad(config: SquadConfig) -> Result<()> {
    let outcome = run_ranking(&config.input, config.config.as_deref(), false, 0)?;

    let squad = summarize_squad(&outcome.records, &config.team);
    if squad.squad_size == 0 {
        anyhow::bail!("No ranked players for team '{}'", config.team.trim());
    }

    let mut stdout = std::io::stdout().lock();
    if config.json {
        serde_json::to_writer_pretty(&mut stdout, &squad)?;
        writeln!(stdout)?;
    } else {
        write_squad(&mut stdout, &squad)?;
    }
    Ok(())
}

pub fn write_squad<W: Write>(out: &mut W, squad: &SquadSummary) -> Result<()> {
    writeln!(out, "{} squad ({} ranked players)", squad.team, squad.squad_size)?;
    for position in &squad.positions {
        writeln!(out, "{} ({})", position.position_group, position.players)?;
        if let Some(top) = &position.top_performer {
            writeln!(
                out,
                "  Top: {} {:.3} {} (rank {})",
                top.name, top.composite_score, top.tier, top.group_rank
            )?;
        }
        for (metric, total) in &position.metric_totals {
            writeln!(out, "  {:<16} {:>10}", metric, total)?;
        }
    }
    Ok(())
}
