//! Command-line surface for semlayer.

use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod output;

pub use commands::Commands;
pub use output::OutputMode;

#[derive(Parser, Debug)]
#[command(
    name = "semlayer",
    version,
    about = "Concept-filtered semantic retrieval over a document folder"
)]
pub struct Cli {
    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Explicit config file (replaces global and project lookup)
    #[arg(long, global = true, env = "SEMLAYER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    #[must_use]
    pub const fn output_mode(&self) -> OutputMode {
        OutputMode::from_robot_flag(self.robot)
    }
}
