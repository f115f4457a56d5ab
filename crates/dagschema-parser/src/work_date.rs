//! Work date resolution.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::patterns::find_weekday;

/// Returns the first Monday strictly after `today`.
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    let days_ahead = 7 - u64::from(today.weekday().num_days_from_monday());
    today + Days::new(days_ahead)
}

/// Returns the date of `weekday` in the week starting next Monday.
pub fn date_for_weekday(weekday: Weekday, today: NaiveDate) -> NaiveDate {
    next_monday(today) + Days::new(u64::from(weekday.num_days_from_monday()))
}

/// Resolves the work date from the first weekday named in `lines`.
///
/// Falls back to next Monday when no line names a weekday.
pub fn resolve_work_date<'a, I>(lines: I, today: NaiveDate) -> NaiveDate
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .find_map(find_weekday)
        .map(|weekday| date_for_weekday(weekday, today))
        .unwrap_or_else(|| next_monday(today))
}
