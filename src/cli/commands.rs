use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "squadpilot", about = "Weekly fantasy football transfers, captaincy and lineup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Propose, validate and (with --apply) execute this gameweek's decision
    Run {
        /// Submit to the game instead of printing the plan
        #[arg(long)]
        apply: bool,
        /// Gameweek (defaults to the next deadline)
        #[arg(long)]
        gw: Option<u32>,
        /// Read the decision JSON from a file instead of the reasoning service
        #[arg(long)]
        decision_file: Option<PathBuf>,
        /// Fail if there is no authenticated session
        #[arg(long)]
        require_team: bool,
        /// Game rules JSON for a non-default variant
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Validate a decision file against the live squad without executing it
    Validate {
        file: PathBuf,
        #[arg(long)]
        gw: Option<u32>,
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Show the current squad, bank, chips and whether this gameweek was already done
    Status {
        #[arg(long)]
        gw: Option<u32>,
    },
    /// List players by value score
    Score {
        #[arg(long)]
        gw: Option<u32>,
        #[arg(long, default_value = "30")]
        limit: usize,
    },
}
