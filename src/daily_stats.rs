//! Per-day completion counters
//!
//! One JSON file per local calendar day under `~/.tomatonote/`:
//!
//! ```text
//! ~/.tomatonote/
//!   20260807.json    # { "<document>": { "<task id>": count } }
//! ```
//!
//! Each increment is a full load-bump-rewrite: the day file is re-read on
//! every call (so the date boundary is the wall clock at load time), the
//! whole store is rewritten atomically, and a sibling `.lock` file
//! serializes concurrent writers to the same day. A missing or unreadable
//! file reads as an empty store. Day files are never deleted here.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::error::{Error, Result};
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};

/// Name of the per-user stats directory under the home directory
pub const STATS_DIR_NAME: &str = ".tomatonote";

/// A day's counters: document identity -> task id -> count
pub type DayLog = BTreeMap<String, BTreeMap<String, u64>>;

/// Handle on the daily counter directory
#[derive(Debug, Clone)]
pub struct DailyStats {
    dir: PathBuf,
}

impl DailyStats {
    /// Store under the user's home directory (`~/.tomatonote`)
    pub fn new() -> Result<Self> {
        let dirs = directories::UserDirs::new().ok_or(Error::NoHomeDir)?;
        Ok(Self {
            dir: dirs.home_dir().join(STATS_DIR_NAME),
        })
    }

    /// Store rooted at an explicit directory
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name stem for a date: `YYYYMMDD`
    pub fn file_stem(date: NaiveDate) -> String {
        date.format("%Y%m%d").to_string()
    }

    /// Path of the log file for a given date
    pub fn file_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.json", Self::file_stem(date)))
    }

    /// Path of the log file for the current local date
    pub fn file_for_today(&self) -> PathBuf {
        self.file_for(Local::now().date_naive())
    }

    /// Load a day's counters; missing or unreadable files are an empty log
    pub fn load(&self, date: NaiveDate) -> DayLog {
        read_log(&self.file_for(date))
    }

    /// Load today's counters
    pub fn load_today(&self) -> DayLog {
        read_log(&self.file_for_today())
    }

    /// Add one completion for a task in a document
    ///
    /// A task with no assigned identifier is skipped: recording is only
    /// meaningful once an identifier exists. The date is resolved at call
    /// time, so a process running across midnight starts a new file
    /// without migrating old entries.
    pub fn increment(&self, document: &str, task_id: Option<&str>) -> Result<()> {
        let Some(task_id) = task_id else {
            return Ok(());
        };

        let path = self.file_for_today();
        let _lock = FileLock::acquire(lock::lock_path_for(&path), DEFAULT_LOCK_TIMEOUT_MS)?;

        let mut log = read_log(&path);
        let count = log
            .entry(document.to_string())
            .or_default()
            .entry(task_id.to_string())
            .or_insert(0);
        *count += 1;

        tracing::debug!(document, task_id, count = *count, "daily counter bumped");

        let json = serde_json::to_string_pretty(&log)?;
        lock::write_atomic(&path, json.as_bytes())
    }
}

fn read_log(path: &Path) -> DayLog {
    match fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
        Err(_) => DayLog::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_names_follow_local_date() {
        let stats = DailyStats::at("/tmp/stats");
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(
            stats.file_for(date),
            PathBuf::from("/tmp/stats/20260807.json")
        );
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let temp = TempDir::new().unwrap();
        let stats = DailyStats::at(temp.path());
        assert!(stats.load_today().is_empty());
    }

    #[test]
    fn unreadable_file_loads_as_empty_and_recovers() {
        let temp = TempDir::new().unwrap();
        let stats = DailyStats::at(temp.path());
        fs::create_dir_all(temp.path()).unwrap();
        fs::write(stats.file_for_today(), "not json").unwrap();

        assert!(stats.load_today().is_empty());

        stats.increment("/tmp/1.md", Some("t1")).unwrap();
        assert_eq!(stats.load_today()["/tmp/1.md"]["t1"], 1);
    }

    #[test]
    fn increment_without_id_is_a_no_op() {
        let temp = TempDir::new().unwrap();
        let stats = DailyStats::at(temp.path());
        stats.increment("/tmp/1.md", None).unwrap();
        assert!(!stats.file_for_today().exists());
    }

    #[test]
    fn counts_are_independent_per_document_and_task() {
        let temp = TempDir::new().unwrap();
        let stats = DailyStats::at(temp.path());

        // interleaved: A, A, B, C, C
        stats.increment("/tmp/1.md", Some("taskA")).unwrap();
        stats.increment("/tmp/1.md", Some("taskA")).unwrap();
        stats.increment("/tmp/2.md", Some("taskB")).unwrap();
        stats.increment("/tmp/2.md", Some("taskC")).unwrap();
        stats.increment("/tmp/2.md", Some("taskC")).unwrap();

        let log = stats.load_today();
        assert_eq!(log["/tmp/1.md"]["taskA"], 2);
        assert_eq!(log["/tmp/2.md"]["taskB"], 1);
        assert_eq!(log["/tmp/2.md"]["taskC"], 2);
        assert_eq!(log["/tmp/1.md"].get("taskB"), None);
    }

    #[test]
    fn written_file_is_valid_pretty_json() {
        let temp = TempDir::new().unwrap();
        let stats = DailyStats::at(temp.path());
        stats.increment("/tmp/1.md", Some("t1")).unwrap();

        let raw = fs::read_to_string(stats.file_for_today()).unwrap();
        let parsed: DayLog = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["/tmp/1.md"]["t1"], 1);
        assert!(raw.contains('\n'), "pretty-printed for hand inspection");
    }
}
