//! Shared fixtures for the integration suites

use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use tomatonote::config::Config;
use tomatonote::daily_stats::DailyStats;
use tomatonote::document::{FileEditor, NoteDocument};
use tomatonote::sound::SoundPlayer;
use tomatonote::timer::{Phase, TomatoTimer};
use tomatonote::ui::TimerUi;

/// A YAML-front-matter note with a couple of task lines
pub fn yaml_note() -> &'static str {
    "---\ntitle: x\n---\n\n- [ ] task1\n- [ ] task2\n"
}

/// The TOML twin of [`yaml_note`]
pub fn toml_note() -> &'static str {
    "+++\ntitle = \"x\"\n+++\n\n- [ ] task1\n- [ ] task2\n"
}

/// Fast cycle for end-to-end runs: 18s work, 6s short, 12s long
pub fn fast_config() -> Config {
    Config {
        pomodoro_minutes: 0.3,
        short_break_minutes: 0.1,
        long_break_minutes: 0.2,
        ..Config::default()
    }
}

/// Everything the UI collaborator was told
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Status {
        phase: Phase,
        remaining_secs: u64,
        task_name: Option<String>,
    },
    Stopped(Option<String>),
    Warning(String),
}

/// Recording UI sink; clone the handle before boxing it into the timer
#[derive(Debug, Clone, Default)]
pub struct RecordingUi {
    events: Arc<Mutex<Vec<UiEvent>>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::Warning(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Phases in the order they were displayed, transitions only
    pub fn phase_sequence(&self) -> Vec<Phase> {
        let mut phases = Vec::new();
        for event in self.events() {
            if let UiEvent::Status { phase, .. } = event {
                if phases.last() != Some(&phase) {
                    phases.push(phase);
                }
            }
        }
        phases
    }
}

impl TimerUi for RecordingUi {
    fn update_status(&mut self, phase: Phase, remaining_secs: u64, task_name: Option<&str>) {
        self.events.lock().unwrap().push(UiEvent::Status {
            phase,
            remaining_secs,
            task_name: task_name.map(String::from),
        });
    }

    fn stopped(&mut self, task_name: Option<&str>) {
        self.events
            .lock()
            .unwrap()
            .push(UiEvent::Stopped(task_name.map(String::from)));
    }

    fn warn(&mut self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(UiEvent::Warning(message.to_string()));
    }
}

/// Recording sound collaborator
#[derive(Debug, Clone, Default)]
pub struct RecordingSound {
    played: Arc<Mutex<Vec<String>>>,
}

impl RecordingSound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<String> {
        self.played.lock().unwrap().clone()
    }
}

impl SoundPlayer for RecordingSound {
    fn play(&self, sound_path: &str) {
        self.played.lock().unwrap().push(sound_path.to_string());
    }
}

/// A timer wired to recording collaborators and a temp stats directory
pub struct Harness {
    pub timer: TomatoTimer,
    pub editor: FileEditor,
    pub ui: RecordingUi,
    pub sound: RecordingSound,
    pub stats: DailyStats,
    _stats_dir: TempDir,
}

impl Harness {
    /// Harness over an in-memory note with the fast test config
    pub fn new(identity: &str, text: &str) -> Self {
        Self::with_config(identity, text, fast_config())
    }

    pub fn with_config(identity: &str, text: &str, config: Config) -> Self {
        let stats_dir = TempDir::new().expect("tempdir");
        let stats = DailyStats::at(stats_dir.path());
        let ui = RecordingUi::new();
        let sound = RecordingSound::new();

        let mut timer = TomatoTimer::new(
            Box::new(ui.clone()),
            Some(Box::new(sound.clone())),
            stats.clone(),
        );
        timer.refresh_config(config);

        Self {
            timer,
            editor: FileEditor::new(NoteDocument::from_text(identity, text)),
            ui,
            sound,
            stats,
            _stats_dir: stats_dir,
        }
    }

    /// Drive the countdown n seconds
    pub fn ticks(&mut self, n: u64) {
        for _ in 0..n {
            self.timer.tick(&mut self.editor);
        }
    }

    /// The note's current text
    pub fn note_text(&self) -> String {
        self.editor.document().expect("open note").text()
    }
}
