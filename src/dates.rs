//! Search date window computation.
//!
//! The site's "Specific Dates" filter takes an inclusive `[start, end]` range.
//! The window covers `period_months` calendar months counting the current one:
//! the start is pinned to the first day of the month `period_months - 1`
//! months back, and the end is simply today (not end-of-month).

use crate::models::DateWindow;
use chrono::{Datelike, Months, NaiveDate};

/// Derive the search window from the period and today's date.
///
/// `period_months = 1` yields a window inside the current month only.
pub fn date_window(period_months: u32, today: NaiveDate) -> DateWindow {
    let shifted = today
        .checked_sub_months(Months::new(period_months - 1))
        .unwrap_or(today);
    // Day 1 always exists, so this cannot fail.
    let start = NaiveDate::from_ymd_opt(shifted.year(), shifted.month(), 1).unwrap();
    DateWindow { start, end: today }
}
