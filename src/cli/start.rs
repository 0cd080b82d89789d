//! `tomatonote start` - run the countdown on a note's task line

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::daily_stats::DailyStats;
use crate::document::{Document, FileEditor, NoteDocument};
use crate::error::{exit_codes, Error, Result};
use crate::sound::{CommandSoundPlayer, SoundPlayer};
use crate::task_line;
use crate::timer::TomatoTimer;
use crate::ui::ConsoleUi;

pub fn run(
    store: DailyStats,
    note: PathBuf,
    line: Option<usize>,
    config_path: Option<PathBuf>,
    sounds_dir: Option<PathBuf>,
    mute: bool,
    pomodoros: Option<u32>,
) -> Result<()> {
    let config = match &config_path {
        Some(path) => Config::load(path)?,
        None => Config::load_from_dir(&note_dir(&note)),
    };

    let mut doc = NoteDocument::open(&note)?;
    let cursor = match line {
        Some(0) => {
            return Err(Error::InvalidArgument(
                "--line is 1-based; use --line 1 for the first line".to_string(),
            ))
        }
        Some(n) => n - 1,
        None => first_task_line(&doc).unwrap_or(0),
    };
    doc.set_cursor(cursor);

    let sound: Option<Box<dyn SoundPlayer>> = if mute {
        None
    } else {
        let base = sounds_dir.unwrap_or_else(|| PathBuf::from("."));
        Some(Box::new(CommandSoundPlayer::new(base)))
    };

    let mut editor = FileEditor::new(doc);
    let mut timer = TomatoTimer::new(Box::new(ConsoleUi::new()), sound, store);
    timer.refresh_config(config);

    if !timer.start(&mut editor) {
        // The precise warning was already shown on the UI surface
        std::process::exit(exit_codes::USER_ERROR);
    }

    let target = pomodoros.map(|n| timer.state().completed_pomodoros + n);
    while timer.is_running() {
        std::thread::sleep(Duration::from_secs(1));
        timer.tick(&mut editor);
        if let Some(target) = target {
            if timer.state().completed_pomodoros >= target {
                timer.stop();
            }
        }
    }

    Ok(())
}

fn note_dir(note: &Path) -> PathBuf {
    match note.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn first_task_line(doc: &NoteDocument) -> Option<usize> {
    (0..doc.line_count())
        .find(|&i| doc.line_text(i).is_some_and(|t| task_line::classify(t).is_some()))
}
