//! Expands the rules of a schedule into dated, timezone-resolved occurrences.

use std::collections::HashSet;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use presensi_core::util::calendar::{days_inclusive, local_to_utc, span_days};
use presensi_db::model::schedule::{Schedule, ScheduleRule};
use uuid::Uuid;

use super::rule_matcher;
use crate::error::{ServiceError, ServiceResult};

/// One concrete calendar instance of a rule, before any metadata is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub date: NaiveDate,
    pub rule_id: Option<Uuid>,
    /// Teaching assignment of the rule, else the run's default.
    pub csst_id: Option<Uuid>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// ## Summary
/// Checks that the schedule's date range can be expanded.
///
/// ## Errors
/// Returns `ServiceError::ValidationError` if `end_date` precedes `start_date`
/// or the range spans more than `max_span_days` days.
pub fn validate_range(schedule: &Schedule, max_span_days: u32) -> ServiceResult<()> {
    let span = span_days(schedule.start_date, schedule.end_date);
    if span < 0 {
        return Err(ServiceError::ValidationError(format!(
            "end date {} is before start date {}",
            schedule.end_date, schedule.start_date
        )));
    }
    if span > i64::from(max_span_days) {
        return Err(ServiceError::ValidationError(format!(
            "schedule spans {span} days, more than the allowed {max_span_days}"
        )));
    }
    Ok(())
}

/// ## Summary
/// Walks every date of the schedule and emits one occurrence per matching rule,
/// in date order and then rule order.
///
/// A schedule without rules yields a single occurrence on its start date with
/// no times. Rule times are read as wall-clock times in `tz`; an end time at or
/// before the start time ends on the following day.
///
/// ## Errors
/// Returns an error if a local time cannot be mapped to UTC in `tz`.
pub fn expand(
    schedule: &Schedule,
    rules: &[ScheduleRule],
    default_csst_id: Option<Uuid>,
    tz: Tz,
) -> ServiceResult<Vec<Occurrence>> {
    if rules.is_empty() {
        return Ok(vec![Occurrence {
            date: schedule.start_date,
            rule_id: None,
            csst_id: default_csst_id,
            starts_at: None,
            ends_at: None,
        }]);
    }

    let mut occurrences = Vec::new();
    for date in days_inclusive(schedule.start_date, schedule.end_date) {
        for rule in rules {
            if !rule_matcher::matches(date, schedule.start_date, rule) {
                continue;
            }
            let (starts_at, ends_at) =
                resolve_times(date, rule.start_time_of_day, rule.end_time_of_day, tz)?;
            occurrences.push(Occurrence {
                date,
                rule_id: Some(rule.id),
                csst_id: rule.csst_id.or(default_csst_id),
                starts_at: Some(starts_at),
                ends_at: Some(ends_at),
            });
        }
    }
    Ok(occurrences)
}

fn resolve_times(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    tz: Tz,
) -> ServiceResult<(DateTime<Utc>, DateTime<Utc>)> {
    let end_date = if end <= start {
        date.checked_add_days(Days::new(1))
            .ok_or(ServiceError::InvariantViolation("date overflow"))?
    } else {
        date
    };
    let starts_at = local_to_utc(tz, date.and_time(start))?;
    let ends_at = local_to_utc(tz, end_date.and_time(end))?;
    Ok((starts_at, ends_at))
}

/// Drops occurrences on dates that already hold a live session, and keeps only
/// the first occurrence of each remaining date.
///
/// At most one live session may exist per schedule and date, so any later
/// occurrence would be skipped at insert time and leave a hole in the meeting
/// numbers.
#[must_use]
pub fn retain_new_dates(
    occurrences: Vec<Occurrence>,
    existing: &HashSet<NaiveDate>,
) -> Vec<Occurrence> {
    let mut seen = HashSet::new();
    occurrences
        .into_iter()
        .filter(|occurrence| !existing.contains(&occurrence.date))
        .filter(|occurrence| seen.insert(occurrence.date))
        .collect()
}
