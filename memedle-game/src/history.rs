//! Cycle history bookkeeping.
//!
//! The history vec holds one entry per calendar day of the current cycle
//! that the player has encountered, keyed by date. Free functions keep the
//! mutation rules in one place; the engine owns when they run.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::phrases::PhraseBook;
use crate::state::{HistoryEntry, HistoryStatus};

/// Synthesize `NOT_PLAYED` entries for every day of the current cycle
/// before `day_in_cycle` that has no record yet. Skipped days (app never
/// opened) show up in history as missed rather than vanishing.
///
/// Idempotent: existing entries are never touched, so replaying the same
/// backfill is a no-op. Returns whether anything was added.
pub fn backfill(
    history: &mut Vec<HistoryEntry>,
    book: &PhraseBook,
    cycle: u32,
    day_in_cycle: usize,
) -> bool {
    let seen: HashSet<NaiveDate> = history.iter().map(|entry| entry.date).collect();
    let len = u32::try_from(book.len()).unwrap_or(u32::MAX);
    let cycle_start = cycle.saturating_mul(len);

    let mut changed = false;
    for offset in 0..day_in_cycle {
        let index = cycle_start.saturating_add(u32::try_from(offset).unwrap_or(u32::MAX));
        let date = book.date_for_index(index);
        if seen.contains(&date) {
            continue;
        }
        history.push(HistoryEntry {
            date,
            phrase: book.phrase_at(offset).display().to_string(),
            status: HistoryStatus::NotPlayed,
            attempts: 0,
        });
        changed = true;
    }
    changed
}

/// Record a finished day, replacing any placeholder for the same date.
/// At most one entry per date survives.
pub fn record_outcome(history: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    if let Some(existing) = history.iter_mut().find(|e| e.date == entry.date) {
        *existing = entry;
    } else {
        history.push(entry);
    }
}

/// History sorted newest-first for display.
#[must_use]
pub fn sorted_desc(history: &[HistoryEntry]) -> Vec<HistoryEntry> {
    let mut entries = history.to_vec();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn book() -> PhraseBook {
        let epoch = NaiveDate::from_ymd_opt(2025, 12, 17).unwrap();
        PhraseBook::new(["lumaca", "pingu", "brainrot"], epoch).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn backfill_fills_skipped_days_in_order() {
        let book = book();
        let mut history = Vec::new();

        let changed = backfill(&mut history, &book, 0, 2);
        assert!(changed);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, date(2025, 12, 17));
        assert_eq!(history[0].phrase, "LUMACA");
        assert_eq!(history[0].status, HistoryStatus::NotPlayed);
        assert_eq!(history[1].date, date(2025, 12, 18));
        assert_eq!(history[1].phrase, "PINGU");
    }

    #[test]
    fn backfill_is_idempotent_and_keeps_outcomes() {
        let book = book();
        let mut history = vec![HistoryEntry {
            date: date(2025, 12, 17),
            phrase: "LUMACA".to_string(),
            status: HistoryStatus::Win,
            attempts: 4,
        }];

        assert!(backfill(&mut history, &book, 0, 2));
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].status, HistoryStatus::Win);

        // Running again adds nothing.
        assert!(!backfill(&mut history, &book, 0, 2));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn backfill_on_day_zero_adds_nothing() {
        let book = book();
        let mut history = Vec::new();
        assert!(!backfill(&mut history, &book, 0, 0));
        assert!(history.is_empty());
    }

    #[test]
    fn backfill_uses_cycle_offset_dates() {
        let book = book();
        let mut history = Vec::new();

        // Second cycle of a 3-phrase rotation starts at index 3.
        backfill(&mut history, &book, 1, 1);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].date, date(2025, 12, 20));
        assert_eq!(history[0].phrase, "LUMACA");
    }

    #[test]
    fn record_outcome_upserts_by_date() {
        let mut history = vec![HistoryEntry {
            date: date(2025, 12, 17),
            phrase: "LUMACA".to_string(),
            status: HistoryStatus::NotPlayed,
            attempts: 0,
        }];

        record_outcome(
            &mut history,
            HistoryEntry {
                date: date(2025, 12, 17),
                phrase: "LUMACA".to_string(),
                status: HistoryStatus::Win,
                attempts: 3,
            },
        );
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, HistoryStatus::Win);
        assert_eq!(history[0].attempts, 3);

        record_outcome(
            &mut history,
            HistoryEntry {
                date: date(2025, 12, 18),
                phrase: "PINGU".to_string(),
                status: HistoryStatus::Fail,
                attempts: 5,
            },
        );
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn sorted_desc_orders_newest_first() {
        let history = vec![
            HistoryEntry {
                date: date(2025, 12, 17),
                phrase: "LUMACA".to_string(),
                status: HistoryStatus::Win,
                attempts: 2,
            },
            HistoryEntry {
                date: date(2025, 12, 19),
                phrase: "BRAINROT".to_string(),
                status: HistoryStatus::NotPlayed,
                attempts: 0,
            },
            HistoryEntry {
                date: date(2025, 12, 18),
                phrase: "PINGU".to_string(),
                status: HistoryStatus::Fail,
                attempts: 5,
            },
        ];

        let sorted = sorted_desc(&history);
        let dates: Vec<NaiveDate> = sorted.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 12, 19), date(2025, 12, 18), date(2025, 12, 17)]
        );
    }
}
