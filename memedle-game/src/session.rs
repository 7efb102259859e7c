//! One day's puzzle in play.
//!
//! `GameSession` is the pure state machine for a single board: the input
//! buffer, accepted rows with their marks, keyboard aggregation, and the
//! win/fail transition. It knows nothing about persistence or clocks;
//! the engine feeds it dates and stores its output.

use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar;
use crate::phrases::{PhraseBook, Selection, max_attempts};
use crate::scoring::{KeyboardTracker, ScoreError, TileMark, score_guess};
use crate::state::GameStatus;

/// Why a submission was rejected. Neither case consumes the buffer or
/// advances the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Buffer holds fewer letters than the target needs.
    #[error("guess has {have} of {need} letters")]
    IncompleteGuess { have: usize, need: usize },
    /// The board already reached WIN or FAIL.
    #[error("game is already over")]
    GameOver,
    /// Scoring invariant violated; cannot happen through the public API.
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// Everything a renderer needs after an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Zero-based row the guess landed on.
    pub row: usize,
    pub marks: Vec<TileMark>,
    /// Status after the transition, `InProgress` if the game continues.
    pub status: GameStatus,
    pub attempts_remaining: usize,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    date: NaiveDate,
    day_index: u32,
    cycle: u32,
    day_in_cycle: usize,
    display: String,
    target: String,
    max_attempts: usize,
    input: String,
    guesses: Vec<String>,
    rows: Vec<Vec<TileMark>>,
    keyboard: KeyboardTracker,
    status: GameStatus,
    ephemeral: bool,
}

impl GameSession {
    /// Fresh board for the phrase that `date` selects. Ephemeral sessions
    /// behave identically but signal the engine to skip persistence.
    #[must_use]
    pub fn new(book: &PhraseBook, date: NaiveDate, ephemeral: bool) -> Self {
        let day_index = calendar::day_index(date, book.epoch());
        Self::from_selection(book.select(day_index), date, day_index, ephemeral)
    }

    /// Rebuild a board from persisted guesses by replaying each one
    /// through the scorer. Guesses whose length no longer matches the
    /// target (stale saves after a phrase-list edit) are skipped; replay
    /// stops once the board is over.
    #[must_use]
    pub fn restore(book: &PhraseBook, date: NaiveDate, prior: &[String]) -> Self {
        let mut session = Self::new(book, date, false);
        for guess in prior {
            if session.status.is_over() {
                break;
            }
            if guess.len() != session.target.len() {
                continue;
            }
            let _ = session.accept(guess.clone());
        }
        session
    }

    fn from_selection(
        selection: Selection<'_>,
        date: NaiveDate,
        day_index: u32,
        ephemeral: bool,
    ) -> Self {
        let target = selection.phrase.normalized().to_string();
        Self {
            date,
            day_index,
            cycle: selection.cycle,
            day_in_cycle: selection.day_in_cycle,
            display: selection.phrase.display().to_string(),
            max_attempts: max_attempts(target.len()),
            target,
            input: String::new(),
            guesses: Vec::new(),
            rows: Vec::new(),
            keyboard: KeyboardTracker::new(),
            status: GameStatus::InProgress,
            ephemeral,
        }
    }

    /// Queue a letter for the active row. Non-letters, overflow past the
    /// target length, and input on a finished board are ignored. Returns
    /// whether the buffer changed.
    pub fn push_letter(&mut self, letter: char) -> bool {
        if self.status.is_over()
            || !letter.is_ascii_alphabetic()
            || self.input.len() >= self.target.len()
        {
            return false;
        }
        self.input.push(letter.to_ascii_uppercase());
        true
    }

    /// Drop the most recent buffered letter. Returns whether the buffer
    /// changed.
    pub fn backspace(&mut self) -> bool {
        if self.status.is_over() {
            return false;
        }
        self.input.pop().is_some()
    }

    /// Submit the buffered row: score it, fold it into the keyboard, and
    /// run the win/fail transition. The buffer is consumed only on
    /// success.
    ///
    /// # Errors
    ///
    /// [`SubmitError::GameOver`] once the board is finished, and
    /// [`SubmitError::IncompleteGuess`] when the buffer is not exactly
    /// target length; both leave the session untouched.
    pub fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        if self.status.is_over() {
            return Err(SubmitError::GameOver);
        }
        if self.input.len() != self.target.len() {
            return Err(SubmitError::IncompleteGuess {
                have: self.input.len(),
                need: self.target.len(),
            });
        }
        let guess = std::mem::take(&mut self.input);
        Ok(self.accept(guess)?)
    }

    fn accept(&mut self, guess: String) -> Result<SubmitOutcome, ScoreError> {
        let marks = score_guess(&guess, &self.target)?;
        let row = self.rows.len();
        self.keyboard.observe_row(&guess, &marks);
        let won = guess == self.target;
        self.guesses.push(guess);
        self.rows.push(marks.clone());
        if won {
            self.status = GameStatus::Win;
        } else if self.rows.len() >= self.max_attempts {
            self.status = GameStatus::Fail;
        }
        Ok(SubmitOutcome {
            row,
            marks,
            status: self.status,
            attempts_remaining: self.attempts_remaining(),
        })
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.status.is_over()
    }

    #[must_use]
    pub const fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub const fn day_index(&self) -> u32 {
        self.day_index
    }

    #[must_use]
    pub const fn cycle(&self) -> u32 {
        self.cycle
    }

    #[must_use]
    pub const fn day_in_cycle(&self) -> usize {
        self.day_in_cycle
    }

    /// Display form of the day's phrase, for reveals and history.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Letters per row.
    #[must_use]
    pub fn target_len(&self) -> usize {
        self.target.len()
    }

    #[must_use]
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    #[must_use]
    pub fn attempts_remaining(&self) -> usize {
        self.max_attempts.saturating_sub(self.rows.len())
    }

    #[must_use]
    pub fn attempts_used(&self) -> u32 {
        u32::try_from(self.guesses.len()).unwrap_or(u32::MAX)
    }

    /// Pending (unsubmitted) letters.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Accepted guesses in submit order, normalized form.
    #[must_use]
    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    /// Marks for each accepted guess, same order as [`Self::guesses`].
    #[must_use]
    pub fn scored_rows(&self) -> &[Vec<TileMark>] {
        &self.rows
    }

    #[must_use]
    pub const fn keyboard(&self) -> &KeyboardTracker {
        &self.keyboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TileMark::{Correct, Present};

    fn book() -> PhraseBook {
        let epoch = NaiveDate::from_ymd_opt(2025, 12, 17).unwrap();
        PhraseBook::new(["pingu", "lumaca"], epoch).unwrap()
    }

    fn day(offset: u32) -> NaiveDate {
        let epoch = NaiveDate::from_ymd_opt(2025, 12, 17).unwrap();
        calendar::date_for_index(offset, epoch)
    }

    fn type_word(session: &mut GameSession, word: &str) {
        for letter in word.chars() {
            session.push_letter(letter);
        }
    }

    #[test]
    fn new_session_derives_board_shape() {
        let session = GameSession::new(&book(), day(0), false);
        assert_eq!(session.target_len(), 5);
        assert_eq!(session.max_attempts(), 5);
        assert_eq!(session.display(), "PINGU");
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!((session.cycle(), session.day_in_cycle()), (0, 0));
    }

    #[test]
    fn input_buffer_caps_at_target_length() {
        let mut session = GameSession::new(&book(), day(0), false);
        type_word(&mut session, "pingux");
        assert_eq!(session.input(), "PINGU");

        assert!(!session.push_letter('3'));
        assert!(session.backspace());
        assert_eq!(session.input(), "PING");
        assert!(session.push_letter('o'));
        assert_eq!(session.input(), "PINGO");
    }

    #[test]
    fn incomplete_submit_keeps_buffer() {
        let mut session = GameSession::new(&book(), day(0), false);
        type_word(&mut session, "pin");

        let err = session.submit().unwrap_err();
        assert_eq!(err, SubmitError::IncompleteGuess { have: 3, need: 5 });
        assert_eq!(session.input(), "PIN");
        assert_eq!(session.attempts_remaining(), 5);
    }

    #[test]
    fn winning_guess_ends_the_board() {
        let mut session = GameSession::new(&book(), day(0), false);
        type_word(&mut session, "pingu");

        let outcome = session.submit().unwrap();
        assert_eq!(outcome.status, GameStatus::Win);
        assert_eq!(outcome.row, 0);
        assert_eq!(outcome.marks, vec![Correct; 5]);
        assert!(session.is_over());
        assert_eq!(session.input(), "");

        // Finished boards reject everything.
        assert!(!session.push_letter('a'));
        assert!(!session.backspace());
        assert_eq!(session.submit().unwrap_err(), SubmitError::GameOver);
    }

    #[test]
    fn exhausting_attempts_fails_the_board() {
        let mut session = GameSession::new(&book(), day(0), false);
        for attempt in 0..session.max_attempts() {
            type_word(&mut session, "pungi");
            let outcome = session.submit().unwrap();
            assert_eq!(outcome.row, attempt);
        }
        assert_eq!(session.status(), GameStatus::Fail);
        assert_eq!(session.attempts_remaining(), 0);
        assert_eq!(session.attempts_used(), 5);
    }

    #[test]
    fn keyboard_accumulates_across_rows() {
        let mut session = GameSession::new(&book(), day(0), false);
        type_word(&mut session, "pungi");
        let outcome = session.submit().unwrap();
        assert_eq!(
            outcome.marks,
            vec![Correct, Present, Correct, Correct, Present]
        );
        assert_eq!(session.keyboard().state('P'), Some(Correct));
        assert_eq!(session.keyboard().state('U'), Some(Present));

        type_word(&mut session, "pingu");
        session.submit().unwrap();
        assert_eq!(session.keyboard().state('U'), Some(Correct));
    }

    #[test]
    fn restore_replays_prior_guesses() {
        let mut live = GameSession::new(&book(), day(0), false);
        type_word(&mut live, "pungi");
        live.submit().unwrap();
        type_word(&mut live, "ping");
        let _ = live.submit(); // incomplete, ignored

        let restored = GameSession::restore(&book(), day(0), live.guesses());
        assert_eq!(restored.guesses(), live.guesses());
        assert_eq!(restored.scored_rows(), live.scored_rows());
        assert_eq!(restored.status(), GameStatus::InProgress);
        assert_eq!(restored.attempts_remaining(), 4);
        assert_eq!(restored.keyboard().state('P'), Some(Correct));
    }

    #[test]
    fn restore_skips_stale_length_guesses() {
        let prior = vec![
            "LUMACA".to_string(), // wrong length for PINGU, dropped
            "PUNGI".to_string(),
        ];
        let restored = GameSession::restore(&book(), day(0), &prior);
        assert_eq!(restored.guesses(), ["PUNGI".to_string()]);
        assert_eq!(restored.attempts_remaining(), 4);
    }

    #[test]
    fn restore_of_won_board_is_over() {
        let prior = vec!["PINGU".to_string()];
        let restored = GameSession::restore(&book(), day(0), &prior);
        assert_eq!(restored.status(), GameStatus::Win);
        assert!(restored.is_over());
    }
}
