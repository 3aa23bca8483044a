use anyhow::Result;
use clap::Parser;
use tiermap::cli::{Cli, Commands};
use tiermap::commands::{
    handle_compare, handle_rank, handle_squad, init_config, validate_project, CompareConfig,
    RankConfig, SquadConfig, ValidateConfig,
};
use tracing_subscriber::EnvFilter;

/// Default log level for a `-v` count; `RUST_LOG` takes precedence.
fn default_log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn init_logging(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbosity))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Rank {
            input,
            config,
            format,
            output,
            group,
            top,
            summary,
            no_parallel,
            jobs,
        } => handle_rank(RankConfig {
            input,
            config,
            format: format.into(),
            output,
            group,
            top,
            summary,
            no_parallel,
            jobs,
        }),
        Commands::Compare {
            input,
            left,
            right,
            config,
        } => handle_compare(CompareConfig {
            input,
            left,
            right,
            config,
        }),
        Commands::Squad {
            input,
            team,
            config,
            json,
        } => handle_squad(SquadConfig {
            input,
            team,
            config,
            json,
        }),
        Commands::Init { force, path } => init_config(&path, force),
        Commands::Validate { config } => validate_project(ValidateConfig { config }),
    }
}
