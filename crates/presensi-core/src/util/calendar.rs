//! Calendar arithmetic used by recurrence matching.
//!
//! ## Summary
//! ISO weekdays, whole weeks elapsed between two dates, Monday-aligned
//! week-of-month numbering, last-week-of-month detection, and conversion of
//! local wall-clock times to UTC in an IANA timezone.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{CoreError, CoreResult};

/// ISO weekday number of `date`: 1 = Monday .. 7 = Sunday.
#[must_use]
pub fn iso_weekday(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}

/// Number of whole weeks from `start` to `date`, floored.
///
/// Negative when `date` precedes `start`.
#[must_use]
pub fn weeks_elapsed(start: NaiveDate, date: NaiveDate) -> i64 {
    (date - start).num_days().div_euclid(7)
}

/// Monday-aligned week of the month containing `date`, starting at 1.
///
/// Week 1 is the (possibly partial) Monday-to-Sunday row that contains the
/// first day of the month, so a month spans 4 to 6 weeks.
#[must_use]
pub fn week_of_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    let lead = first.weekday().num_days_from_monday();
    (date.day() + lead - 1) / 7 + 1
}

/// True when `date` falls in the last seven days of its month.
#[must_use]
pub fn is_last_week_of_month(date: NaiveDate) -> bool {
    date.checked_add_days(Days::new(7))
        .is_none_or(|next| next.month() != date.month())
}

/// Signed number of days from `start` to `end`.
#[must_use]
pub fn span_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Every date from `start` through `end`, inclusive.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// ## Summary
/// Parses an IANA timezone name.
///
/// ## Errors
/// Returns `CoreError::UnknownTimezone` if the name is not in the tz database.
pub fn parse_timezone(name: &str) -> CoreResult<Tz> {
    Tz::from_str(name.trim()).map_err(|_e| CoreError::UnknownTimezone(name.to_string()))
}

/// ## Summary
/// Interprets a wall-clock time in `tz` and converts it to UTC.
///
/// Ambiguous times (DST fold) resolve to the earlier instant. Times inside a
/// DST gap are shifted forward by one hour.
///
/// ## Errors
/// Returns `CoreError::NonExistentTime` if the shifted time still does not
/// exist in `tz`.
pub fn local_to_utc(tz: Tz, local: NaiveDateTime) -> CoreResult<DateTime<Utc>> {
    if let Some(resolved) = tz.from_local_datetime(&local).earliest() {
        return Ok(resolved.with_timezone(&Utc));
    }

    tracing::debug!(%local, timezone = %tz, "Local time falls in a DST gap, shifting forward");

    local
        .checked_add_signed(TimeDelta::hours(1))
        .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
        .map(|resolved| resolved.with_timezone(&Utc))
        .ok_or_else(|| CoreError::NonExistentTime {
            time: local.to_string(),
            timezone: tz.name().to_string(),
        })
}
