//! Game orchestration: persistence, day rollover, and cycle rollover.
//!
//! `GameEngine` owns the durable [`SavedState`] and the live
//! [`GameSession`], keeping the two coherent. All storage access is
//! fail-soft: a broken store degrades the engine to in-memory play and
//! surfaces a typed warning instead of an error.

use std::fmt;

use chrono::NaiveDate;

use crate::constants::STATE_KEY;
use crate::history;
use crate::phrases::PhraseBook;
use crate::session::{GameSession, SubmitError, SubmitOutcome};
use crate::state::{GameStatus, HistoryEntry, HistoryStatus, SavedState, Stats};
use crate::{Clock, StateStore};

/// Non-fatal conditions front-ends may surface to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineWarning {
    /// Reading the persisted blob failed; starting from defaults.
    StorageLoadFailed,
    /// The persisted blob was not valid state JSON; starting from
    /// defaults.
    StorageCorrupt,
    /// A write failed; progress is in-memory only for this run.
    StorageSaveFailed,
}

impl EngineWarning {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::StorageLoadFailed => "saved progress could not be read; starting fresh",
            Self::StorageCorrupt => "saved progress was unreadable; starting fresh",
            Self::StorageSaveFailed => "progress could not be saved; playing in memory only",
        }
    }
}

impl fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The puzzle engine, generic over host capabilities.
pub struct GameEngine<C: Clock, S: StateStore> {
    clock: C,
    store: S,
    book: PhraseBook,
    saved: SavedState,
    session: GameSession,
    warnings: Vec<EngineWarning>,
}

impl<C: Clock, S: StateStore> GameEngine<C, S> {
    /// Load persisted state (defaults on any failure) and start today's
    /// daily game, running day and cycle rollovers as needed.
    pub fn new(clock: C, store: S, book: PhraseBook) -> Self {
        let mut warnings = Vec::new();
        let saved = load_state(&store, &mut warnings);
        let today = clock.today();
        // Placeholder session; replaced by initialize below. Ephemeral so
        // nothing persists before rollover checks run.
        let session = GameSession::new(&book, today, true);
        let mut engine = Self {
            clock,
            store,
            book,
            saved,
            session,
            warnings,
        };
        engine.initialize(None);
        engine
    }

    /// Start (or restart) a session. `None` plays today's daily puzzle
    /// with full persistence; `Some(date)` starts an ephemeral practice
    /// board for that date's phrase which never touches the durable
    /// record. Starting any session abandons the previous one.
    pub fn initialize(&mut self, date_override: Option<NaiveDate>) {
        match date_override {
            Some(date) => {
                self.session = GameSession::new(&self.book, date, true);
            }
            None => self.start_daily(),
        }
    }

    fn start_daily(&mut self) {
        let today = self.clock.today();
        let day_index = self.book.day_index_for(today);
        let (cycle, day_in_cycle) = {
            let selection = self.book.select(day_index);
            (selection.cycle, selection.day_in_cycle)
        };

        // Cycle rollover: history and daily fields belong to one rotation.
        if self.saved.cycle != Some(cycle) {
            self.saved.reset_cycle(cycle);
            self.persist();
        }

        // Days skipped since the cycle started show up as missed.
        if history::backfill(&mut self.saved.history, &self.book, cycle, day_in_cycle) {
            self.persist();
        }

        if self.saved.last_played_date == Some(today) {
            self.session = GameSession::restore(&self.book, today, &self.saved.guesses);
        } else {
            self.saved.reset_daily(today);
            self.persist();
            self.session = GameSession::new(&self.book, today, false);
        }
    }

    /// Forward a typed letter to the live session.
    pub fn handle_letter(&mut self, letter: char) -> bool {
        self.session.push_letter(letter)
    }

    /// Forward a backspace to the live session.
    pub fn handle_backspace(&mut self) -> bool {
        self.session.backspace()
    }

    /// Submit the buffered row. Daily outcomes update stats and history
    /// and persist; practice boards change nothing durable.
    ///
    /// # Errors
    ///
    /// Propagates [`SubmitError`] from the session; rejected submissions
    /// leave both session and durable state untouched.
    pub fn submit_guess(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let outcome = self.session.submit()?;
        if self.session.is_ephemeral() {
            return Ok(outcome);
        }

        self.saved.guesses = self.session.guesses().to_vec();
        self.saved.game_status = outcome.status;
        match outcome.status {
            GameStatus::Win => self.finish_day(HistoryStatus::Win),
            GameStatus::Fail => self.finish_day(HistoryStatus::Fail),
            GameStatus::InProgress => {}
        }
        self.persist();
        Ok(outcome)
    }

    fn finish_day(&mut self, result: HistoryStatus) {
        let today = self.session.date();
        match result {
            HistoryStatus::Win => self.saved.stats.record_win(today),
            HistoryStatus::Fail => self.saved.stats.record_loss(),
            HistoryStatus::NotPlayed => return,
        }
        let entry = HistoryEntry {
            date: today,
            phrase: self.session.display().to_string(),
            status: result,
            attempts: self.session.attempts_used(),
        };
        history::record_outcome(&mut self.saved.history, entry);
    }

    /// The live session, for rendering.
    #[must_use]
    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    /// The rotation in play.
    #[must_use]
    pub const fn book(&self) -> &PhraseBook {
        &self.book
    }

    #[must_use]
    pub fn attempts_remaining(&self) -> usize {
        self.session.attempts_remaining()
    }

    /// Copy of the lifetime counters.
    #[must_use]
    pub fn stats_snapshot(&self) -> Stats {
        self.saved.stats.clone()
    }

    /// Current cycle's history, newest first.
    #[must_use]
    pub fn history_snapshot(&self) -> Vec<HistoryEntry> {
        history::sorted_desc(&self.saved.history)
    }

    /// Drain accumulated warnings. Each condition is reported once.
    pub fn take_warnings(&mut self) -> Vec<EngineWarning> {
        std::mem::take(&mut self.warnings)
    }

    fn persist(&mut self) {
        match serde_json::to_string(&self.saved) {
            Ok(json) => {
                if self.store.set(STATE_KEY, &json).is_err() {
                    self.push_warning(EngineWarning::StorageSaveFailed);
                }
            }
            Err(_) => self.push_warning(EngineWarning::StorageSaveFailed),
        }
    }

    fn push_warning(&mut self, warning: EngineWarning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }
}

fn load_state<S: StateStore>(store: &S, warnings: &mut Vec<EngineWarning>) -> SavedState {
    match store.get(STATE_KEY) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(state) => state,
            Err(_) => {
                warnings.push(EngineWarning::StorageCorrupt);
                SavedState::default()
            }
        },
        Ok(None) => SavedState::default(),
        Err(_) => {
            warnings.push(EngineWarning::StorageLoadFailed);
            SavedState::default()
        }
    }
}
