//! Phrase catalog, daily selection, and attempt budgets.
//!
//! The catalog is an ordered rotation: day index `i` plays phrase
//! `i % len`, and `i / len` numbers the cycle. Order is therefore part of
//! the contract; inserting, removing, or reordering entries shifts every
//! date from the change onward.

use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar;
use crate::constants::{
    ATTEMPTS_BONUS, ATTEMPTS_MAX, ATTEMPTS_MIN, ATTEMPTS_RATIO_DEN, ATTEMPTS_RATIO_NUM, EPOCH_DAY,
    EPOCH_MONTH, EPOCH_YEAR,
};
use crate::normalize::{normalize, to_display};

/// Built-in rotation. Append-only: editing or reordering existing entries
/// invalidates persisted history.
pub const BUILTIN_PHRASES: [&str; 50] = [
    "cristoteca",
    "almeno mille",
    "io palla",
    "penicillina",
    "skimited",
    "spicchia",
    "shampoo",
    "pasta al pesto",
    "dittatrice",
    "trapano",
    "zaya mbriaca",
    "lumaca",
    "brainrot",
    "pingu",
    "salsa alle alici",
    "professori pakistani",
    "twei",
    "suvvia",
    "davide",
    "gigabatta",
    "shuttle bus",
    "creppine",
    "forrok",
    "orlando",
    "obbligo o verita",
    "labubu",
    "fantasma di otabek",
    "cameriera della mensa",
    "basalto",
    "cinque chili di cereali",
    "caffe di mika",
    "taipei",
    "uova grado uno",
    "fermentazione",
    "smascellatore",
    "insomma",
    "ha fatto vicino a me",
    "giovanni two",
    "gleatz",
    "pollice di tomi",
    "giorgida",
    "banconota da duemila won",
    "ola ha la centoquattro",
    "porridge nel microonde",
    "shahzoda",
    "bunny bunny",
    "doccia di toma",
    "camminata grissinbon",
    "concerto di flauti",
    "caffe onion",
];

/// A phrase list that cannot drive the rotation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("phrase list is empty")]
    EmptyPhraseList,
    #[error("phrase {index} ({raw:?}) has no letters after normalization")]
    UnplayablePhrase { index: usize, raw: String },
}

/// One puzzle phrase with both precomputed forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    display: String,
    normalized: String,
}

impl Phrase {
    fn from_raw(raw: &str) -> Self {
        Self {
            display: to_display(raw),
            normalized: normalize(raw),
        }
    }

    /// Uppercased human-facing form with word boundaries intact.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Canonical comparison form; guesses are scored against this.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Number of guessable letters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Where a day index lands in the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a> {
    pub phrase: &'a Phrase,
    /// Zero-based count of completed rotations.
    pub cycle: u32,
    /// Position within the current rotation.
    pub day_in_cycle: usize,
}

/// Ordered, validated phrase rotation plus the epoch that anchors day zero.
#[derive(Debug, Clone)]
pub struct PhraseBook {
    phrases: Vec<Phrase>,
    epoch: NaiveDate,
}

impl PhraseBook {
    /// Build a rotation from raw phrase text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the list is empty or any entry
    /// normalizes to zero letters.
    pub fn new<I, S>(raw: I, epoch: NaiveDate) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut phrases = Vec::new();
        for (index, item) in raw.into_iter().enumerate() {
            let phrase = Phrase::from_raw(item.as_ref());
            if phrase.is_empty() {
                return Err(ConfigError::UnplayablePhrase {
                    index,
                    raw: item.as_ref().to_string(),
                });
            }
            phrases.push(phrase);
        }
        if phrases.is_empty() {
            return Err(ConfigError::EmptyPhraseList);
        }
        Ok(Self { phrases, epoch })
    }

    /// The stock rotation with the stock epoch. Every entry in
    /// [`BUILTIN_PHRASES`] is known-playable, so no validation runs.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            phrases: BUILTIN_PHRASES.iter().map(|raw| Phrase::from_raw(raw)).collect(),
            epoch: builtin_epoch(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Date that maps to day index zero.
    #[must_use]
    pub const fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    /// Day index for a calendar date, clamped to zero before the epoch.
    #[must_use]
    pub fn day_index_for(&self, date: NaiveDate) -> u32 {
        calendar::day_index(date, self.epoch)
    }

    /// Calendar date for a global day index.
    #[must_use]
    pub fn date_for_index(&self, index: u32) -> NaiveDate {
        calendar::date_for_index(index, self.epoch)
    }

    /// Map a global day index onto the rotation.
    #[must_use]
    pub fn select(&self, day_index: u32) -> Selection<'_> {
        let len = u32::try_from(self.phrases.len()).unwrap_or(u32::MAX);
        let cycle = day_index / len;
        let day_in_cycle = (day_index % len) as usize;
        Selection {
            phrase: &self.phrases[day_in_cycle],
            cycle,
            day_in_cycle,
        }
    }

    /// Phrase at a position within the rotation, wrapping past the end.
    #[must_use]
    pub fn phrase_at(&self, day_in_cycle: usize) -> &Phrase {
        &self.phrases[day_in_cycle % self.phrases.len()]
    }
}

fn builtin_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(EPOCH_YEAR, EPOCH_MONTH, EPOCH_DAY).unwrap_or_default()
}

/// Guess rows granted for a target of `normalized_len` letters:
/// `ceil(0.6 * len) + 2`, clamped to `[5, 12]`.
#[must_use]
pub const fn max_attempts(normalized_len: usize) -> usize {
    let scaled = (normalized_len * ATTEMPTS_RATIO_NUM).div_ceil(ATTEMPTS_RATIO_DEN);
    let raw = scaled + ATTEMPTS_BONUS;
    if raw < ATTEMPTS_MIN {
        ATTEMPTS_MIN
    } else if raw > ATTEMPTS_MAX {
        ATTEMPTS_MAX
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_phrase_book() -> PhraseBook {
        PhraseBook::new(["lumaca", "pingu"], builtin_epoch()).unwrap()
    }

    #[test]
    fn builtin_book_is_valid() {
        let validated = PhraseBook::new(BUILTIN_PHRASES, builtin_epoch()).unwrap();
        let builtin = PhraseBook::builtin();
        assert_eq!(builtin.len(), validated.len());
        assert_eq!(builtin.epoch(), validated.epoch());
        for index in 0..builtin.len() {
            assert_eq!(builtin.phrase_at(index), validated.phrase_at(index));
        }
    }

    #[test]
    fn phrases_precompute_both_forms() {
        let book = PhraseBook::builtin();
        let pasta = book.phrase_at(7);
        assert_eq!(pasta.display(), "PASTA AL PESTO");
        assert_eq!(pasta.normalized(), "PASTAALPESTO");
        assert_eq!(pasta.len(), 12);
    }

    #[test]
    fn empty_list_is_rejected() {
        let raw: [&str; 0] = [];
        let err = PhraseBook::new(raw, builtin_epoch()).unwrap_err();
        assert_eq!(err, ConfigError::EmptyPhraseList);
    }

    #[test]
    fn unplayable_phrase_is_rejected_with_position() {
        let err = PhraseBook::new(["lumaca", "42!", "pingu"], builtin_epoch()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnplayablePhrase {
                index: 1,
                raw: "42!".to_string()
            }
        );
    }

    #[test]
    fn selection_wraps_across_cycles() {
        let book = two_phrase_book();

        let day0 = book.select(0);
        assert_eq!(day0.phrase.normalized(), "LUMACA");
        assert_eq!((day0.cycle, day0.day_in_cycle), (0, 0));

        let day1 = book.select(1);
        assert_eq!(day1.phrase.normalized(), "PINGU");
        assert_eq!((day1.cycle, day1.day_in_cycle), (0, 1));

        let day2 = book.select(2);
        assert_eq!(day2.phrase.normalized(), "LUMACA");
        assert_eq!((day2.cycle, day2.day_in_cycle), (1, 0));

        let day5 = book.select(5);
        assert_eq!((day5.cycle, day5.day_in_cycle), (2, 1));
    }

    #[test]
    fn builtin_rotation_matches_calendar() {
        let book = PhraseBook::builtin();
        let first = book.select(book.day_index_for(book.epoch()));
        assert_eq!(first.phrase.normalized(), "CRISTOTECA");

        // One full rotation later the first phrase comes back.
        let len = u32::try_from(book.len()).unwrap();
        let wrapped = book.select(len);
        assert_eq!(wrapped.phrase.normalized(), "CRISTOTECA");
        assert_eq!(wrapped.cycle, 1);
    }

    #[test]
    fn attempt_budget_follows_length() {
        assert_eq!(max_attempts(5), 5); // ceil(3) + 2
        assert_eq!(max_attempts(7), 7); // ceil(4.2) + 2
        assert_eq!(max_attempts(10), 8); // ceil(6) + 2
        assert_eq!(max_attempts(12), 10);
    }

    #[test]
    fn attempt_budget_clamps_at_both_ends() {
        assert_eq!(max_attempts(1), 5);
        assert_eq!(max_attempts(4), 5);
        assert_eq!(max_attempts(20), 12);
        assert_eq!(max_attempts(100), 12);
    }
}
