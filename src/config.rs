//! Configuration loading and management
//!
//! Handles parsing of `.tomatonote.toml` configuration files. The timer
//! treats a `Config` as a plain value: the engine never reads the file
//! itself, and a refreshed value only affects future phase durations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::timer::Transition;

/// Name of the configuration file looked up next to the note / in the cwd
pub const CONFIG_FILE_NAME: &str = ".tomatonote.toml";

/// Main configuration structure
///
/// Durations are minutes and may be fractional (`0.3` minutes == 18s),
/// which keeps short end-to-end runs practical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Length of a work interval in minutes
    #[serde(default = "default_pomodoro_minutes")]
    pub pomodoro_minutes: f64,

    /// Length of a short break in minutes
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: f64,

    /// Length of the long break (every fourth completion) in minutes
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: f64,

    /// Sound cue played when a work interval rolls into the long break
    #[serde(default = "default_sound_pomodoro_to_long")]
    pub sound_pomodoro_to_long: String,

    /// Sound cue played when a work interval rolls into a short break
    #[serde(default = "default_sound_pomodoro_to_short")]
    pub sound_pomodoro_to_short: String,

    /// Sound cue played when a short break rolls back into work
    #[serde(default = "default_sound_short_to_pomodoro")]
    pub sound_short_to_pomodoro: String,

    /// Sound cue played when the long break rolls back into work
    #[serde(default = "default_sound_long_to_pomodoro")]
    pub sound_long_to_pomodoro: String,
}

fn default_pomodoro_minutes() -> f64 {
    25.0
}

fn default_short_break_minutes() -> f64 {
    5.0
}

fn default_long_break_minutes() -> f64 {
    15.0
}

fn default_sound_pomodoro_to_long() -> String {
    "sounds/pomodoro-to-long.mp3".to_string()
}

fn default_sound_pomodoro_to_short() -> String {
    "sounds/pomodoro-to-short.mp3".to_string()
}

fn default_sound_short_to_pomodoro() -> String {
    "sounds/short-to-pomodoro.mp3".to_string()
}

fn default_sound_long_to_pomodoro() -> String {
    "sounds/long-to-pomodoro.mp3".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pomodoro_minutes: default_pomodoro_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            sound_pomodoro_to_long: default_sound_pomodoro_to_long(),
            sound_pomodoro_to_short: default_sound_pomodoro_to_short(),
            sound_short_to_pomodoro: default_sound_short_to_pomodoro(),
            sound_long_to_pomodoro: default_sound_long_to_pomodoro(),
        }
    }
}

impl Config {
    /// Load configuration from a `.tomatonote.toml` file
    pub fn load(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.tomatonote.toml` from a directory, or return defaults
    pub fn load_from_dir(dir: &std::path::Path) -> Self {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &PathBuf) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Work-interval length in whole seconds
    pub fn pomodoro_secs(&self) -> u64 {
        minutes_to_secs(self.pomodoro_minutes)
    }

    /// Short-break length in whole seconds
    pub fn short_break_secs(&self) -> u64 {
        minutes_to_secs(self.short_break_minutes)
    }

    /// Long-break length in whole seconds
    pub fn long_break_secs(&self) -> u64 {
        minutes_to_secs(self.long_break_minutes)
    }

    /// Sound cue configured for a transition
    pub fn sound_for(&self, transition: Transition) -> &str {
        match transition {
            Transition::PomodoroToLong => &self.sound_pomodoro_to_long,
            Transition::PomodoroToShort => &self.sound_pomodoro_to_short,
            Transition::ShortToPomodoro => &self.sound_short_to_pomodoro,
            Transition::LongToPomodoro => &self.sound_long_to_pomodoro,
        }
    }

    fn validate(&self) -> Result<()> {
        for (field, minutes) in [
            ("pomodoro_minutes", self.pomodoro_minutes),
            ("short_break_minutes", self.short_break_minutes),
            ("long_break_minutes", self.long_break_minutes),
        ] {
            if !minutes.is_finite() || minutes <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{field} must be a positive number of minutes"
                )));
            }
            if minutes_to_secs(minutes) == 0 {
                return Err(Error::InvalidConfig(format!(
                    "{field} is too short to produce a countdown second"
                )));
            }
        }
        Ok(())
    }
}

fn minutes_to_secs(minutes: f64) -> u64 {
    (minutes * 60.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.pomodoro_minutes, 25.0);
        assert_eq!(cfg.short_break_minutes, 5.0);
        assert_eq!(cfg.long_break_minutes, 15.0);
        assert_eq!(cfg.pomodoro_secs(), 1500);
        assert_eq!(cfg.short_break_secs(), 300);
        assert_eq!(cfg.long_break_secs(), 900);
        assert_eq!(cfg.sound_pomodoro_to_long, "sounds/pomodoro-to-long.mp3");
        assert_eq!(cfg.sound_pomodoro_to_short, "sounds/pomodoro-to-short.mp3");
        assert_eq!(cfg.sound_short_to_pomodoro, "sounds/short-to-pomodoro.mp3");
        assert_eq!(cfg.sound_long_to_pomodoro, "sounds/long-to-pomodoro.mp3");
    }

    #[test]
    fn fractional_minutes_round_to_whole_seconds() {
        let cfg = Config {
            pomodoro_minutes: 0.3,
            short_break_minutes: 0.1,
            long_break_minutes: 0.2,
            ..Config::default()
        };
        assert_eq!(cfg.pomodoro_secs(), 18);
        assert_eq!(cfg.short_break_secs(), 6);
        assert_eq!(cfg.long_break_secs(), 12);
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        let content = r#"
pomodoro_minutes = 50.0
short_break_minutes = 10.0
sound_pomodoro_to_short = "ding.wav"
"#;
        fs::write(&path, content.trim()).expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.pomodoro_minutes, 50.0);
        assert_eq!(cfg.short_break_minutes, 10.0);
        // untouched fields keep their defaults
        assert_eq!(cfg.long_break_minutes, 15.0);
        assert_eq!(cfg.sound_pomodoro_to_short, "ding.wav");
        assert_eq!(cfg.sound_long_to_pomodoro, "sounds/long-to-pomodoro.mp3");
    }

    #[test]
    fn non_positive_duration_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "pomodoro_minutes = 0.0").expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        match err {
            Error::InvalidConfig(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn sub_second_duration_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "short_break_minutes = 0.005").expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn load_from_dir_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from_dir(dir.path());
        assert_eq!(cfg.pomodoro_minutes, 25.0);
    }

    #[test]
    fn save_writes_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.toml");
        let cfg = Config::default();
        cfg.save(&path).expect("save config");

        let written = fs::read_to_string(&path).expect("read config");
        assert!(written.contains("pomodoro_minutes = 25.0"));
    }

    #[test]
    fn sound_for_covers_all_transitions() {
        let cfg = Config::default();
        assert_eq!(
            cfg.sound_for(Transition::PomodoroToLong),
            "sounds/pomodoro-to-long.mp3"
        );
        assert_eq!(
            cfg.sound_for(Transition::PomodoroToShort),
            "sounds/pomodoro-to-short.mp3"
        );
        assert_eq!(
            cfg.sound_for(Transition::ShortToPomodoro),
            "sounds/short-to-pomodoro.mp3"
        );
        assert_eq!(
            cfg.sound_for(Transition::LongToPomodoro),
            "sounds/long-to-pomodoro.mp3"
        );
    }
}
