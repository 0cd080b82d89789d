//! UI collaborator surface
//!
//! The timer pushes three kinds of events outward: a status update on
//! every tick/transition, a stopped notice, and warnings. `ConsoleUi`
//! renders them on a terminal; tests substitute a recording sink.

use std::io::Write;

use crate::timer::Phase;

/// Receives timer events; the only user-visible surface the core talks to
pub trait TimerUi {
    /// New phase and/or remaining time to display
    fn update_status(&mut self, phase: Phase, remaining_secs: u64, task_name: Option<&str>);

    /// The countdown was stopped; the task name stays visible
    fn stopped(&mut self, task_name: Option<&str>);

    /// A recoverable problem the user should see
    fn warn(&mut self, message: &str);
}

/// Render a status line like `🍅 24:59 task1`
pub fn status_line(phase: Phase, remaining_secs: u64, task_name: Option<&str>) -> String {
    let icon = match phase {
        Phase::Pomodoro => "🍅",
        Phase::ShortBreak => "☕",
        Phase::LongBreak => "🛌",
    };
    let mins = remaining_secs / 60;
    let secs = remaining_secs % 60;
    format!("{icon} {mins}:{secs:02} {}", task_name.unwrap_or("-"))
}

/// Terminal implementation: status on stdout (in place), warnings on stderr
#[derive(Debug, Default)]
pub struct ConsoleUi;

impl ConsoleUi {
    pub fn new() -> Self {
        Self
    }
}

impl TimerUi for ConsoleUi {
    fn update_status(&mut self, phase: Phase, remaining_secs: u64, task_name: Option<&str>) {
        let mut out = std::io::stdout();
        let _ = write!(out, "\r{}\x1b[K", status_line(phase, remaining_secs, task_name));
        let _ = out.flush();
    }

    fn stopped(&mut self, task_name: Option<&str>) {
        println!("\n⏰ stopped {}", task_name.unwrap_or("-"));
    }

    fn warn(&mut self, message: &str) {
        eprintln!("tomatonote: {message}");
    }
}
