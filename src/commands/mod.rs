//! CLI command implementations for tiermap.
//!
//! Available commands:
//! - **rank**: Rank a player file and render the tiered result
//! - **compare**: Head-to-head comparison of two ranked players
//! - **squad**: Per-position breakdown of one team's ranked players
//! - **init**: Write a commented default configuration file
//! - **validate**: Report every problem in a configuration file

pub mod compare;
pub mod init;
pub mod rank;
pub mod squad;
pub mod validate;

pub use compare::{handle_compare, CompareConfig};
pub use init::init_config;
pub use rank::{handle_rank, RankConfig};
pub use squad::{handle_squad, SquadConfig};
pub use validate::{validate_project, ValidateConfig};
