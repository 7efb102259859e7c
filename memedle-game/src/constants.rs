//! Centralized tuning constants for the memedle puzzle logic.
//!
//! These values define the deterministic math for puzzle selection and
//! attempt budgets. Changing any of them shifts the daily mapping.

// Puzzle epoch (day index zero) ---------------------------------------------
pub(crate) const EPOCH_YEAR: i32 = 2025;
pub(crate) const EPOCH_MONTH: u32 = 12;
pub(crate) const EPOCH_DAY: u32 = 17;

// Attempt budget -------------------------------------------------------------
// Budget formula: ceil(len * RATIO_NUM / RATIO_DEN) + BONUS, clamped to
// [ATTEMPTS_MIN, ATTEMPTS_MAX]. 3/5 is the exact integer form of 0.6.
pub(crate) const ATTEMPTS_RATIO_NUM: usize = 3;
pub(crate) const ATTEMPTS_RATIO_DEN: usize = 5;
pub(crate) const ATTEMPTS_BONUS: usize = 2;
pub(crate) const ATTEMPTS_MIN: usize = 5;
pub(crate) const ATTEMPTS_MAX: usize = 12;

// Persistence ----------------------------------------------------------------
/// Single key under which the durable state blob is stored.
pub const STATE_KEY: &str = "memedle.state";
