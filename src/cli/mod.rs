//! Command-line interface for tomatonote
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::daily_stats::DailyStats;
use crate::error::Result;

mod start;
mod stats;

/// tomatonote - pomodoros for Markdown task lists
///
/// Binds a countdown to the task line under the cursor, then records each
/// completed tomato in the note's front matter and in a per-day log.
#[derive(Parser, Debug)]
#[command(name = "tomatonote")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the daily logs (defaults to ~/.tomatonote)
    #[arg(long, global = true, env = "TOMATONOTE_DIR")]
    pub stats_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the countdown against a task line in a Markdown note
    Start {
        /// The note to work in
        note: PathBuf,

        /// 1-based line of the task (defaults to the first task line)
        #[arg(long)]
        line: Option<usize>,

        /// Configuration file (defaults to .tomatonote.toml next to the note)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Base directory for relative sound paths (defaults to the cwd)
        #[arg(long)]
        sounds_dir: Option<PathBuf>,

        /// Skip sound cues
        #[arg(long)]
        mute: bool,

        /// Stop after this many completed pomodoros (default: run until ^C)
        #[arg(long)]
        pomodoros: Option<u32>,
    },

    /// Show a day's completion counters
    Stats {
        /// Day to show as YYYYMMDD (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Execute the parsed command
    pub fn run(self) -> Result<()> {
        let store = match &self.stats_dir {
            Some(dir) => DailyStats::at(dir),
            None => DailyStats::new()?,
        };

        match self.command {
            Commands::Start {
                note,
                line,
                config,
                sounds_dir,
                mute,
                pomodoros,
            } => start::run(store, note, line, config, sounds_dir, mute, pomodoros),
            Commands::Stats { date, json } => stats::run(store, date, json),
        }
    }
}
