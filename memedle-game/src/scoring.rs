//! Tile scoring and keyboard letter-state aggregation.
//!
//! Scoring implements the classic two-pass feedback rules with proper
//! duplicate handling: exact matches claim their letter from the target's
//! pool first, then remaining guess letters claim what is left. A letter
//! is never marked present more times than it occurs in the target.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-tile verdict for one guessed letter.
///
/// Ordering doubles as keyboard precedence: `Absent < Present < Correct`,
/// so the best state seen for a key is simply the maximum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum TileMark {
    /// Letter does not occur in the target (or all its occurrences are
    /// already claimed).
    #[default]
    Absent,
    /// Letter occurs in the target at a different position.
    Present,
    /// Letter is in exactly the right position.
    Correct,
}

impl TileMark {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Present => "present",
            Self::Correct => "correct",
        }
    }
}

impl fmt::Display for TileMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoring precondition violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("guess has {guess} letters but target has {target}")]
    LengthMismatch { guess: usize, target: usize },
}

/// Pool slot for an ASCII uppercase letter, `None` for anything else.
const fn slot(byte: u8) -> Option<usize> {
    if byte.is_ascii_uppercase() {
        Some((byte - b'A') as usize)
    } else {
        None
    }
}

/// Score `guess` against `target`. Both must be normalized forms
/// (uppercase ASCII letters) of equal length.
///
/// # Errors
///
/// Returns [`ScoreError::LengthMismatch`] when the lengths differ; the
/// caller is expected to reject short input before scoring.
pub fn score_guess(guess: &str, target: &str) -> Result<Vec<TileMark>, ScoreError> {
    if guess.len() != target.len() {
        return Err(ScoreError::LengthMismatch {
            guess: guess.len(),
            target: target.len(),
        });
    }

    let guess = guess.as_bytes();
    let target = target.as_bytes();
    let mut marks = vec![TileMark::Absent; guess.len()];

    // Letters of the target still available for present-marks.
    let mut remaining = [0u8; 26];
    for &byte in target {
        if let Some(index) = slot(byte) {
            remaining[index] = remaining[index].saturating_add(1);
        }
    }

    // First pass: exact matches claim their letter from the pool.
    for i in 0..guess.len() {
        if guess[i] == target[i] {
            marks[i] = TileMark::Correct;
            if let Some(index) = slot(guess[i]) {
                remaining[index] = remaining[index].saturating_sub(1);
            }
        }
    }

    // Second pass: misplaced letters claim what is left, left to right.
    for i in 0..guess.len() {
        if marks[i] == TileMark::Correct {
            continue;
        }
        if let Some(index) = slot(guess[i])
            && remaining[index] > 0
        {
            remaining[index] -= 1;
            marks[i] = TileMark::Present;
        }
    }

    Ok(marks)
}

/// Best tile mark seen per letter across all scored rows of a session.
///
/// States only ever upgrade; a key that has shown `Correct` stays
/// `Correct` even if a later guess places the letter wrongly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardTracker {
    states: [Option<TileMark>; 26],
}

impl KeyboardTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            states: [None; 26],
        }
    }

    /// Fold one scored row into the tracker.
    pub fn observe_row(&mut self, guess: &str, marks: &[TileMark]) {
        for (byte, mark) in guess.bytes().zip(marks.iter().copied()) {
            if let Some(index) = slot(byte.to_ascii_uppercase()) {
                let best = match self.states[index] {
                    Some(previous) => previous.max(mark),
                    None => mark,
                };
                self.states[index] = Some(best);
            }
        }
    }

    /// Current state for a letter, `None` if it has not been guessed.
    #[must_use]
    pub fn state(&self, letter: char) -> Option<TileMark> {
        if !letter.is_ascii_alphabetic() {
            return None;
        }
        slot(letter.to_ascii_uppercase() as u8).and_then(|index| self.states[index])
    }
}

impl Default for KeyboardTracker {
    fn default() -> Self {
        Self::new()
    }
}
