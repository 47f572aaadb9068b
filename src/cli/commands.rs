//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hiitfit")]
#[command(about = "Track the exercises you complete each day", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (default: $HIITFIT_HOME or the platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mark an exercise as completed today
    Done {
        /// Exercise name (e.g., squat, "sun salute")
        exercise: String,
    },

    /// Add an exercise to today or a past day
    Add {
        /// Exercise name (e.g., squat, "sun salute")
        exercise: String,

        /// Day to record it on (e.g., yesterday, "last monday", 17-01-2025)
        #[arg(long, value_name = "TIME_REF")]
        on: Option<String>,
    },

    /// Show recorded days, newest first
    History {
        /// Maximum number of days to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the last seven days ending at the most recent recorded day
    Week,

    /// Delete everything recorded on a day
    Remove {
        /// Day to delete (e.g., yesterday, 17-01-2025)
        #[arg(value_name = "TIME_REF")]
        day: String,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
