use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `cur` binary.
#[derive(Debug, Parser)]
#[command(name = "cur", version, about = "Curator - automated AI application gallery")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory the persisted state lives in (defaults to `data`)
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one iteration: generate, review, fix, commit
    Run,
    /// Create and seed the target repository
    Init,
    /// Show persisted counters and the last iteration
    Status,
}
