//! Memedle Game Engine
//!
//! Platform-agnostic core logic for the Memedle daily phrase-guessing puzzle.
//! This crate provides phrase selection, scoring, and state tracking without
//! UI or platform-specific dependencies.

pub mod calendar;
pub mod constants;
pub mod engine;
pub mod history;
pub mod normalize;
pub mod phrases;
pub mod scoring;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use calendar::{DATE_FORMAT, InvalidDate, date_for_index, day_index, parse_date};
pub use constants::STATE_KEY;
pub use engine::{EngineWarning, GameEngine};
pub use history::sorted_desc;
pub use normalize::{normalize, to_display};
pub use phrases::{BUILTIN_PHRASES, ConfigError, Phrase, PhraseBook, Selection, max_attempts};
pub use scoring::{KeyboardTracker, ScoreError, TileMark, score_guess};
pub use session::{GameSession, SubmitError, SubmitOutcome};
pub use state::{GameStatus, HistoryEntry, HistoryStatus, SavedState, Stats};

/// Trait for abstracting the current calendar date
/// Platform-specific implementations should provide this
pub trait Clock {
    /// Today's date in the player's local calendar. Daily puzzles roll
    /// over at local midnight.
    fn today(&self) -> chrono::NaiveDate;
}

/// Trait for abstracting key-value blob persistence
/// Platform-specific implementations should provide this
pub trait StateStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the blob stored under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write `value` under `key`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}
