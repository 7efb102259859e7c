//! Read-only stats and history views.
//!
//! These load the durable record directly instead of starting an engine,
//! so inspecting progress never claims the day or mutates the save file.

use anyhow::{Context, Result};
use colored::Colorize;
use memedle_game::{HistoryStatus, STATE_KEY, SavedState, StateStore, Stats, sorted_desc};

use crate::store::FileStore;

/// Load the saved blob; a missing file reads as a fresh record.
pub fn load_saved(store: &FileStore) -> Result<SavedState> {
    let Some(blob) = store.get(STATE_KEY).context("reading saved state")? else {
        return Ok(SavedState::default());
    };
    serde_json::from_str(&blob).context("parsing saved state")
}

pub fn print_stats(stats: &Stats) {
    println!("{}", "📊 Stats".bright_yellow().bold());
    println!("{}", "-".repeat(28).yellow());
    println!("Played     {}", stats.played.to_string().bold());
    println!("Win rate   {}", format!("{}%", stats.win_pct()).bold());
    println!("Streak     {}", stats.streak.to_string().bold());
    if let Some(date) = stats.last_win_date {
        println!("Last win   {}", date.to_string().bold());
    }
}

pub fn print_history(saved: &SavedState) {
    println!("{}", "📜 Cycle history".bright_yellow().bold());
    println!("{}", "-".repeat(28).yellow());
    let entries = sorted_desc(&saved.history);
    if entries.is_empty() {
        println!("Nothing recorded in this cycle yet.");
        return;
    }
    for entry in &entries {
        let badge = match entry.status {
            HistoryStatus::Win => format!("won in {}", entry.attempts).green().bold().to_string(),
            HistoryStatus::Fail => "failed".red().bold().to_string(),
            HistoryStatus::NotPlayed => "not played".bright_black().to_string(),
        };
        println!("{}  {:<24} {badge}", entry.date, entry.phrase);
    }
}
