//! Calendar cadence arithmetic
//!
//! Deltas are counted across calendar boundaries (days, ISO weeks, months,
//! years), not as elapsed durations: 23:59 Sunday to 00:01 Monday is one week.

use chrono::{Datelike, Days, Months, NaiveDate};
use crate::models::Repeat;
use crate::utils::start_of_week;

/// Number of cadence boundaries crossed going from `from` to `to`
///
/// Negative when `to` lies in an earlier period. Always 0 for `Repeat::None`.
pub fn cadence_delta(repeat: Repeat, from: NaiveDate, to: NaiveDate) -> i64 {
    match repeat {
        Repeat::None => 0,
        Repeat::Daily => (to - from).num_days(),
        Repeat::Weekly => (start_of_week(to) - start_of_week(from)).num_days() / 7,
        Repeat::Monthly => month_index(to) - month_index(from),
        Repeat::Yearly => (to.year() - from.year()) as i64,
    }
}

/// Advance `date` by one cadence unit
///
/// Month and year steps clamp the day to the target month (Jan 31 -> Feb 28).
/// A date at the end of the calendar range stays put.
pub fn advance(repeat: Repeat, date: NaiveDate) -> NaiveDate {
    let next = match repeat {
        Repeat::None => return date,
        Repeat::Daily => date.checked_add_days(Days::new(1)),
        Repeat::Weekly => date.checked_add_days(Days::new(7)),
        Repeat::Monthly => date.checked_add_months(Months::new(1)),
        Repeat::Yearly => date.checked_add_months(Months::new(12)),
    };
    next.unwrap_or(date)
}

fn month_index(date: NaiveDate) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}
