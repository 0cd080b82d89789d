//! tomatonote - Pomodoro Tracking Library
//!
//! This library provides the core functionality for the tomatonote CLI,
//! binding pomodoro work intervals to task lines in Markdown notes.
//!
//! # Core Concepts
//!
//! - **Task lines**: Markdown checkbox items (`- [ ] task1`) as the unit
//!   of work, re-identified across sessions by an embedded stable id
//! - **Phase machine**: pomodoro / short break / long break countdown,
//!   with the long break after every fourth completed pomodoro
//! - **Front matter**: completion counters written into the note's own
//!   metadata header (YAML `---` or TOML `+++` dialect)
//! - **Daily log**: per-calendar-day JSON counters under `~/.tomatonote`
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `config`: durations and sound cues from `.tomatonote.toml`
//! - `daily_stats`: per-day counter store with atomic writes
//! - `document`: narrow editor/document traits and the file-backed note
//! - `error`: error types and result aliases
//! - `frontmatter`: dialect-aware header parse/mutate/serialize
//! - `lock`: file locking and atomic replacement
//! - `sound`: transition sound cues
//! - `task`: a to-do item bound to a document line
//! - `task_line`: task-line classification and stable-id handling
//! - `timer`: the phase state machine
//! - `ui`: status/warning surface

pub mod cli;
pub mod config;
pub mod daily_stats;
pub mod document;
pub mod error;
pub mod frontmatter;
pub mod lock;
pub mod sound;
pub mod task;
pub mod task_line;
pub mod timer;
pub mod ui;

pub use config::Config;
pub use error::{Error, Result};
pub use timer::{Phase, PhaseState, TomatoTimer, Transition};
