use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fitforge", version, author, about = "Forge your strength — a terminal workout tracker with points, streaks and ranks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// First-run setup wizard (training days, fitness level, units)
    Setup {
        /// Reset existing configuration
        #[arg(long)]
        reset: bool,
    },
    /// Log a workout session from a JSON file and score it
    Log {
        /// Path to the session JSON file
        file: String,
        /// Attribute the session to a plan
        #[arg(long)]
        plan: Option<String>,
        /// Plan day index (0-based), used with --plan
        #[arg(long)]
        day: Option<usize>,
    },
    /// Show rank, points, streak and weekly progress
    Status,
    /// Show earned badges
    Badges {
        /// Include locked badges from the full catalog
        #[arg(long)]
        all: bool,
    },
    /// Show recent point events
    History {
        /// How many events to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Show lifetime statistics
    Stats {
        /// Show ASCII activity grid for the last 7 days
        #[arg(long)]
        week: bool,
    },
    /// Workout plan management
    Plan {
        #[command(subcommand)]
        action: PlanCommands,
    },
    /// Export a progress summary to stdout
    Export,
}

#[derive(Subcommand, Debug)]
pub enum PlanCommands {
    /// Add or replace a plan from a JSON file
    Add {
        /// Path to the plan JSON file
        file: String,
    },
    /// List stored plans
    List,
    /// Record a full run-through of a plan
    Complete {
        /// Plan id
        id: String,
    },
}
