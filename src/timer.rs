//! The pomodoro phase state machine
//!
//! One `TomatoTimer` owns the whole run state ([`PhaseState`]) and mutates
//! it only inside `start`/`stop`/`tick`. The countdown itself is driven
//! externally: the host calls [`TomatoTimer::tick`] once per second while
//! [`TomatoTimer::is_running`], which keeps the machine deterministic
//! under test — a test is just a loop of ticks.
//!
//! Phase cycle:
//!
//! ```text
//! pomodoro -> shortBreak -> pomodoro -> ... -> pomodoro -> longBreak
//!             (every 4th completed pomodoro takes the long break)
//! ```
//!
//! A completed work interval records itself twice before the break
//! starts: `params.tasks.<id>.tomato` in the note's front matter, and the
//! per-day counter log. Recording failures are reported and the countdown
//! keeps going.

use crate::config::Config;
use crate::daily_stats::DailyStats;
use crate::document::{Document, Editor};
use crate::error::{Error, Result};
use crate::frontmatter;
use crate::sound::SoundPlayer;
use crate::task::Task;
use crate::ui::TimerUi;

/// Completed pomodoros between long breaks
pub const LONG_BREAK_EVERY: u32 = 4;

/// The three phases of the work/break cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

/// The four phase transitions, each with its own sound cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    PomodoroToShort,
    PomodoroToLong,
    ShortToPomodoro,
    LongToPomodoro,
}

/// Mutable run state of the timer
#[derive(Debug, Clone)]
pub struct PhaseState {
    pub phase: Phase,
    /// Never goes below zero; hitting exactly zero triggers a transition
    pub remaining_secs: u64,
    /// Monotonically increasing across restarts
    pub completed_pomodoros: u32,
    /// Set on start, retained through transitions and stop
    pub active_task: Option<Task>,
}

impl Default for PhaseState {
    fn default() -> Self {
        Self {
            phase: Phase::Pomodoro,
            remaining_secs: 0,
            completed_pomodoros: 0,
            active_task: None,
        }
    }
}

/// The pomodoro engine: phase machine, task binding, countdown
pub struct TomatoTimer {
    config: Option<Config>,
    state: PhaseState,
    running: bool,
    ui: Box<dyn TimerUi>,
    sound: Option<Box<dyn SoundPlayer>>,
    stats: DailyStats,
}

impl TomatoTimer {
    pub fn new(
        ui: Box<dyn TimerUi>,
        sound: Option<Box<dyn SoundPlayer>>,
        stats: DailyStats,
    ) -> Self {
        Self {
            config: None,
            state: PhaseState::default(),
            running: false,
            ui,
            sound,
            stats,
        }
    }

    /// Replace the configuration
    ///
    /// Safe while a countdown runs: only future phase durations change,
    /// never the one in progress.
    pub fn refresh_config(&mut self, config: Config) {
        self.config = Some(config);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &PhaseState {
        &self.state
    }

    pub fn current_task(&self) -> Option<&Task> {
        self.state.active_task.as_ref()
    }

    /// Bind the cursor's task line and begin a fresh pomodoro countdown
    ///
    /// Preconditions are checked in order and each failure emits exactly
    /// one distinct warning without starting anything: no active document,
    /// unsupported document kind, no front-matter header, cursor not on a
    /// task line. On success any prior countdown is abandoned, the task's
    /// stable id is resolved (minted and written into the document when
    /// absent), and the initial status is emitted. Returns whether the
    /// countdown began.
    pub fn start(&mut self, editor: &mut dyn Editor) -> bool {
        let pomodoro_secs = self.config().pomodoro_secs();

        // Re-entrant: a running countdown is cancelled before anything else
        self.running = false;

        let Some(doc) = editor.active_document() else {
            self.ui.warn(&Error::NoActiveDocument.to_string());
            return false;
        };
        if !doc.is_markdown() {
            self.ui.warn(&Error::UnsupportedDocument.to_string());
            return false;
        }
        if frontmatter::locate(doc).is_none() {
            self.ui.warn(&Error::MissingFrontMatter.to_string());
            return false;
        }

        let cursor = doc.cursor_line();
        let task = doc
            .line_text(cursor)
            .and_then(|text| Task::from_line(doc.identity(), cursor, text));
        let Some(mut task) = task else {
            self.ui.warn(&Error::NotATaskLine.to_string());
            return false;
        };

        if let Err(err) = task.ensure_id(doc) {
            self.ui
                .warn(&format!("could not tag the task line: {err}"));
            return false;
        }

        tracing::debug!(task = task.name(), id = ?task.id(), "countdown started");

        self.state.phase = Phase::Pomodoro;
        self.state.remaining_secs = pomodoro_secs;
        self.state.active_task = Some(task);
        self.running = true;
        self.emit_status();
        true
    }

    /// Cancel the countdown; the active task stays bound
    ///
    /// Idempotent: stopping an already stopped timer just repeats the
    /// stopped notification.
    pub fn stop(&mut self) {
        self.running = false;
        self.state.remaining_secs = 0;
        tracing::debug!("countdown stopped");
        self.ui.stopped(task_name(&self.state));
    }

    /// Advance the countdown by one second
    ///
    /// At zero the phase transition runs: a finished pomodoro first
    /// records its completion (front matter and daily log — failures are
    /// warned about, never fatal to the countdown), then the completion
    /// count decides short versus long break. Every transition emits
    /// exactly one status update and one sound cue.
    pub fn tick(&mut self, editor: &mut dyn Editor) {
        let config = self.config().clone();
        if !self.running {
            return;
        }

        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        if self.state.remaining_secs > 0 {
            self.emit_status();
            return;
        }

        let transition = match self.state.phase {
            Phase::Pomodoro => {
                // Record before the new count is visible to the branch below
                if let Err(err) = self.record_completion(editor) {
                    self.ui
                        .warn(&format!("could not record the completed pomodoro: {err}"));
                }
                self.state.completed_pomodoros += 1;
                if self.state.completed_pomodoros % LONG_BREAK_EVERY == 0 {
                    self.state.phase = Phase::LongBreak;
                    self.state.remaining_secs = config.long_break_secs();
                    Transition::PomodoroToLong
                } else {
                    self.state.phase = Phase::ShortBreak;
                    self.state.remaining_secs = config.short_break_secs();
                    Transition::PomodoroToShort
                }
            }
            Phase::ShortBreak => {
                self.state.phase = Phase::Pomodoro;
                self.state.remaining_secs = config.pomodoro_secs();
                Transition::ShortToPomodoro
            }
            Phase::LongBreak => {
                self.state.phase = Phase::Pomodoro;
                self.state.remaining_secs = config.pomodoro_secs();
                Transition::LongToPomodoro
            }
        };

        tracing::debug!(
            ?transition,
            completed = self.state.completed_pomodoros,
            "phase transition"
        );

        if let Some(player) = &self.sound {
            player.play(config.sound_for(transition));
        }
        self.emit_status();
    }

    /// Record one completed work interval for the active task
    ///
    /// Front matter is updated on the document active right now (force
    /// saved); the daily log is keyed by the identity captured at start.
    fn record_completion(&mut self, editor: &mut dyn Editor) -> Result<()> {
        let task = self
            .state
            .active_task
            .as_ref()
            .expect("a running countdown always has an active task");
        let task_id = task
            .id()
            .expect("the task id is assigned when the countdown starts")
            .to_string();
        let document_identity = task.document().to_string();

        let doc = editor.active_document().ok_or(Error::NoActiveDocument)?;
        if !doc.is_markdown() {
            return Err(Error::UnsupportedDocument);
        }
        frontmatter::update(
            doc,
            |fields| fields.increment_task_tomato(&task_id).map(|_| ()),
            true,
        )?;

        self.stats.increment(&document_identity, Some(&task_id))
    }

    fn emit_status(&mut self) {
        self.ui.update_status(
            self.state.phase,
            self.state.remaining_secs,
            task_name(&self.state),
        );
    }

    fn config(&self) -> &Config {
        self.config
            .as_ref()
            .expect("configuration must be supplied before the timer runs")
    }
}

fn task_name(state: &PhaseState) -> Option<&str> {
    state.active_task.as_ref().map(Task::name)
}
