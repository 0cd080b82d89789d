//! `tomatonote stats` - show a day's completion counters

use chrono::{Local, NaiveDate};

use crate::daily_stats::DailyStats;
use crate::error::{Error, Result};

pub fn run(store: DailyStats, date: Option<String>, json: bool) -> Result<()> {
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y%m%d").map_err(|_| {
            Error::InvalidArgument(format!("--date must be YYYYMMDD, got '{raw}'"))
        })?,
        None => Local::now().date_naive(),
    };

    let log = store.load(date);

    if json {
        println!("{}", serde_json::to_string_pretty(&log)?);
        return Ok(());
    }

    let stem = DailyStats::file_stem(date);
    if log.is_empty() {
        println!("No tomatoes recorded for {stem}.");
        return Ok(());
    }

    println!("Tomatoes for {stem}:");
    for (document, tasks) in &log {
        let total: u64 = tasks.values().sum();
        println!();
        println!("{document} ({total} 🍅)");
        for (task_id, count) in tasks {
            println!("  {task_id}: {count}");
        }
    }

    Ok(())
}
