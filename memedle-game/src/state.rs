//! Durable game state.
//!
//! Everything here serializes into the single JSON blob the engine
//! persists. Every field carries `#[serde(default)]` so blobs written by
//! older or newer builds load without error; unknown fields are ignored.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status of the current day's game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[default]
    InProgress,
    Win,
    Fail,
}

impl GameStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Win => "WIN",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome recorded for one calendar day of the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryStatus {
    #[default]
    NotPlayed,
    Win,
    Fail,
}

impl HistoryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotPlayed => "NOT_PLAYED",
            Self::Win => "WIN",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifetime aggregate counters. These survive both day changes and cycle
/// rollovers; only explicit user action (clearing the store) resets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub played: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub streak: u32,
    /// Date of the most recent win. Written for export and display; no
    /// game rule reads it back.
    #[serde(default)]
    pub last_win_date: Option<NaiveDate>,
}

impl Stats {
    pub fn record_win(&mut self, date: NaiveDate) {
        self.played = self.played.saturating_add(1);
        self.wins = self.wins.saturating_add(1);
        self.streak = self.streak.saturating_add(1);
        self.last_win_date = Some(date);
    }

    pub fn record_loss(&mut self) {
        self.played = self.played.saturating_add(1);
        self.streak = 0;
    }

    /// Win percentage rounded to the nearest whole number, 0 when no
    /// games have been played.
    #[must_use]
    pub fn win_pct(&self) -> u32 {
        if self.played == 0 {
            return 0;
        }
        let played = u64::from(self.played);
        let pct = (u64::from(self.wins) * 100 + played / 2) / played;
        u32::try_from(pct).unwrap_or(u32::MAX)
    }
}

/// One calendar day's record within the current cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: NaiveDate,
    /// Display form of the day's phrase, revealed in history views.
    #[serde(default)]
    pub phrase: String,
    #[serde(default)]
    pub status: HistoryStatus,
    /// Guesses used; zero for days never played.
    #[serde(default)]
    pub attempts: u32,
}

/// The single durable record. Serialized field names are the wire
/// contract; see the field renames below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SavedState {
    /// Day the in-progress fields belong to; `None` until first play.
    #[serde(default)]
    pub last_played_date: Option<NaiveDate>,
    /// Accepted guesses for that day, in normalized form and submit order.
    #[serde(default)]
    pub guesses: Vec<String>,
    #[serde(default)]
    pub game_status: GameStatus,
    #[serde(default)]
    pub stats: Stats,
    /// Current cycle's day records, one per calendar day encountered.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    /// Cycle the history belongs to; `None` in blobs from before cycle
    /// tracking, treated as a rollover.
    #[serde(default)]
    pub cycle: Option<u32>,
}

impl SavedState {
    /// Start a fresh game for a new calendar day, keeping stats and
    /// history intact.
    pub fn reset_daily(&mut self, today: NaiveDate) {
        self.last_played_date = Some(today);
        self.guesses.clear();
        self.game_status = GameStatus::InProgress;
    }

    /// Clear rotation-scoped fields when the active cycle changes. Stats
    /// carry over; the day's fields restart so the new cycle's phrase is
    /// not scored against stale guesses.
    pub fn reset_cycle(&mut self, cycle: u32) {
        self.cycle = Some(cycle);
        self.history.clear();
        self.last_played_date = None;
        self.guesses.clear();
        self.game_status = GameStatus::InProgress;
    }
}
