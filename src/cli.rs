//! Command-line interface for strictly_linepaint.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Linepaint - single-stroke line-painting puzzle
#[derive(Parser, Debug)]
#[command(name = "strictly_linepaint")]
#[command(about = "Type-safe line-painting puzzle for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play the level pack interactively
    Play {
        /// Path to game configuration (defaults are used if it doesn't exist)
        #[arg(short, long, default_value = "linepaint.toml")]
        config: PathBuf,

        /// Override the level pack path from the config
        #[arg(short, long)]
        levels: Option<PathBuf>,

        /// Override the save file path from the config
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Validate a level pack and print a summary of each level
    Validate {
        /// Level pack (.toml or .json)
        #[arg(short, long, default_value = "levels.toml")]
        levels: PathBuf,
    },

    /// Show or reset saved progression
    Progress {
        /// Save file
        #[arg(short, long, default_value = "linepaint_save.toml")]
        save: PathBuf,

        /// Reset level and reward to zero
        #[arg(long)]
        reset: bool,
    },
}
