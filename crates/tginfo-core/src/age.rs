//! Account creation estimates derived from a user id.
//!
//! Telegram hands out user ids roughly monotonically, so a handful of known
//! `(id, date)` anchors plus a fixed growth rate give a usable guess. The
//! numbers are a heuristic and are kept stable so responses stay comparable.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta};

/// Known anchors, ordered by id.
const REFERENCE_POINTS: [(i64, (i32, u32, u32)); 4] = [
    (100_000_000, (2013, 8, 1)),
    (1_273_841_502, (2020, 8, 13)),
    (1_500_000_000, (2021, 5, 1)),
    (2_000_000_000, (2022, 12, 1)),
];

/// One day of account growth is assumed to span this many ids.
pub const IDS_PER_DAY: i64 = 20_000_000;

const MICROS_PER_DAY: i64 = 86_400_000_000;

fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Estimate when the account with `user_id` was created.
///
/// Picks the nearest anchor (first one wins on ties) and extrapolates linearly,
/// without clamping, for ids far outside the table.
pub fn estimate_creation(user_id: i64) -> NaiveDateTime {
    let (ref_id, (y, m, d)) = REFERENCE_POINTS
        .iter()
        .copied()
        .min_by_key(|(id, _)| id.abs_diff(user_id))
        .unwrap_or(REFERENCE_POINTS[0]);

    let delta = user_id.saturating_sub(ref_id);
    let micros = delta.saturating_mul(MICROS_PER_DAY / IDS_PER_DAY);
    let anchor = midnight(y, m, d);

    anchor
        .checked_add_signed(TimeDelta::microseconds(micros))
        .unwrap_or(if micros < 0 {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        })
}

/// Calendar-aware difference between two instants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarSpan {
    pub years: i64,
    pub months: i64,
    pub days: i64,
}

impl CalendarSpan {
    /// Whole months are stepped from `from` until the next step would pass `to`,
    /// then the remainder is counted in days. Components are negative when `to`
    /// is earlier; month ends clamp in both directions.
    pub fn between(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        let mut months = i64::from(to.year() - from.year()) * 12 + i64::from(to.month())
            - i64::from(from.month());
        let mut anchor = shift_months(from, months);

        if to >= from {
            while anchor > to {
                months -= 1;
                anchor = shift_months(from, months);
            }
        } else {
            while anchor < to {
                months += 1;
                anchor = shift_months(from, months);
            }
        }

        Self {
            years: months / 12,
            months: months % 12,
            days: (to - anchor).num_days(),
        }
    }
}

impl std::fmt::Display for CalendarSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} years, {} months, {} days",
            self.years, self.months, self.days
        )
    }
}

// Clamps to the last day of the target month (Jan 31 + 1 month = Feb 28/29).
fn shift_months(from: NaiveDateTime, months: i64) -> NaiveDateTime {
    let Ok(n) = u32::try_from(months.unsigned_abs()) else {
        return from;
    };
    let shifted = if months >= 0 {
        from.checked_add_months(Months::new(n))
    } else {
        from.checked_sub_months(Months::new(n))
    };
    shifted.unwrap_or(from)
}

/// `"August 01, 2013"`.
pub fn format_created_on(created: NaiveDateTime) -> String {
    created.format("%B %d, %Y").to_string()
}

/// `"<Y> years, <M> months, <D> days"` elapsed between `created` and `now`.
pub fn format_account_age(created: NaiveDateTime, now: NaiveDateTime) -> String {
    CalendarSpan::between(created, now).to_string()
}
