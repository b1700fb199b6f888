use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

/// Returns today's date in the viewer's local calendar.
///
/// This is the single source of truth for "today" in rule checks and period
/// navigation. Rule checks evaluate it at validation time, not at record
/// construction time, so edits re-check against the current date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Converts a calendar date to the fixed midday instant it is persisted at.
///
/// Time-of-day carries no meaning on a tip record. Anchoring stored instants
/// at 12:00 UTC keeps `date_of_instant` exact for any civil timezone offset,
/// all of which sit within twelve hours of noon.
pub fn midday_instant(date: NaiveDate) -> DateTime<Utc> {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
    date.and_time(noon).and_utc()
}

/// Recovers the calendar date from a stored midday instant.
pub fn date_of_instant(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}
