use super::rank::run_ranking;
use crate::analysis::{compare_players, PlayerComparison};
use crate::core::TieredRecord;
use crate::ranking::RankingOutcome;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

pub struct CompareConfig {
    pub input: PathBuf,
    pub left: String,
    pub right: String,
    pub config: Option<PathBuf>,
}

fn ranked_player<'a>(outcome: &'a RankingOutcome, name: &str) -> Result<&'a TieredRecord> {
    let matches = outcome.find_player(name);
    match matches.as_slice() {
        [] => anyhow::bail!("Player '{}' was not ranked", name),
        [only] => Ok(only),
        [first, ..] => {
            warn!(
                "{} ranked entries named '{}', comparing the {} {} entry",
                matches.len(),
                name,
                first.position_group,
                first.season.as_deref().unwrap_or("(no season)")
            );
            Ok(first)
        }
    }
}

pub fn handle_compare(config: CompareConfig) -> Result<()> {
    let outcome = run_ranking(&config.input, config.config.as_deref(), false, 0)?;

    let left = ranked_player(&outcome, &config.left)?;
    let right = ranked_player(&outcome, &config.right)?;
    let comparison = compare_players(left, right).context("Cannot compare players")?;

    let mut stdout = std::io::stdout().lock();
    write_comparison(&mut stdout, left, right, &comparison)?;
    Ok(())
}

pub fn write_comparison<W: Write>(
    out: &mut W,
    left: &TieredRecord,
    right: &TieredRecord,
    comparison: &PlayerComparison,
) -> Result<()> {
    writeln!(out, "{} comparison", comparison.position_group)?;
    for player in [left, right] {
        writeln!(
            out,
            "  {:<24} {:>7.3}  {} (rank {})",
            player.name, player.composite_score, player.tier, player.group_rank
        )?;
    }
    match comparison.winner() {
        Some(winner) => writeln!(
            out,
            "Winner: {} by {:.3}",
            winner,
            comparison.score_gap.abs()
        )?,
        None => writeln!(out, "Draw")?,
    }

    writeln!(out, "Largest differences:")?;
    for delta in &comparison.deltas {
        let raw = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{v}"));
        writeln!(
            out,
            "  {:<16} {:>8} vs {:<8} contribution gap {:+.3}",
            delta.metric,
            raw(delta.left_raw),
            raw(delta.right_raw),
            delta.contribution_gap
        )?;
    }
    Ok(())
}
