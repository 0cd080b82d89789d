//! Sound collaborator surface
//!
//! Transition cues are file paths from the configuration; the production
//! player resolves relative paths against a base directory and hands them
//! to the platform's command-line player, fire-and-forget. A missing file
//! or failed spawn is a warning, never an error the timer sees.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Plays a configured sound cue
pub trait SoundPlayer {
    fn play(&self, sound_path: &str);
}

/// Spawns `afplay` (macOS) / `aplay` (elsewhere) for each cue
#[derive(Debug, Clone)]
pub struct CommandSoundPlayer {
    base_dir: PathBuf,
}

impl CommandSoundPlayer {
    /// Relative cue paths resolve against `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn resolve(&self, sound_path: &str) -> PathBuf {
        let path = Path::new(sound_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl SoundPlayer for CommandSoundPlayer {
    fn play(&self, sound_path: &str) {
        let path = self.resolve(sound_path);
        if !path.exists() {
            tracing::warn!(path = %path.display(), "sound file does not exist");
            return;
        }

        let player = if cfg!(target_os = "macos") {
            "afplay"
        } else {
            "aplay"
        };

        match Command::new(player)
            .arg(&path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(_) => tracing::debug!(path = %path.display(), "playing sound cue"),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "failed to spawn sound player")
            }
        }
    }
}
