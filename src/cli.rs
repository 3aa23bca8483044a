use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tiermap")]
#[command(about = "Position-aware tier rankings for football player statistics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v: info, -vv: debug). RUST_LOG overrides.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank players and assign tiers within each position group
    Rank {
        /// Player statistics file (.csv or .json)
        input: PathBuf,

        /// Configuration file (defaults to the nearest tiermap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only show this position group
        #[arg(short, long)]
        group: Option<String>,

        /// Show only the top N players of each group
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Append a per-tier summary
        #[arg(long)]
        summary: bool,

        /// Rank position groups one after another
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Number of threads for group processing (0 = use the global pool)
        #[arg(short = 'j', long = "jobs", default_value = "0", env = "TIERMAP_JOBS")]
        jobs: usize,
    },

    /// Compare two ranked players of the same position group
    Compare {
        /// Player statistics file (.csv or .json)
        input: PathBuf,

        /// Name of the first player
        left: String,

        /// Name of the second player
        right: String,

        /// Configuration file (defaults to the nearest tiermap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Summarize one team's ranked squad by position group
    Squad {
        /// Player statistics file (.csv or .json)
        input: PathBuf,

        /// Team name, as written in the input
        team: String,

        /// Configuration file (defaults to the nearest tiermap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,

        /// Where to write the file
        #[arg(long, default_value = "tiermap.toml")]
        path: PathBuf,
    },

    /// Check a configuration file and report every problem
    Validate {
        /// Configuration file (defaults to the nearest tiermap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Csv => crate::io::output::OutputFormat::Csv,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}
