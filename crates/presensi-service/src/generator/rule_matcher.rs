//! Decides whether a calendar date satisfies one weekly recurrence rule.

use chrono::NaiveDate;
use presensi_core::util::calendar::{
    is_last_week_of_month, iso_weekday, week_of_month, weeks_elapsed,
};
use presensi_db::db::enums::WeekParity;
use presensi_db::model::schedule::ScheduleRule;

/// ## Summary
/// Returns true when `date` is an occurrence of `rule` for a schedule starting
/// on `schedule_start`.
///
/// All constraints are ANDed: weekday, week offset, interval, parity of the
/// interval cycle, week of month, and last week of month. A rule that sets both
/// `weeks_of_month` and `last_week_of_month` must satisfy both.
#[must_use]
pub fn matches(date: NaiveDate, schedule_start: NaiveDate, rule: &ScheduleRule) -> bool {
    if i64::from(iso_weekday(date)) != i64::from(rule.day_of_week) {
        return false;
    }

    let adjusted = weeks_elapsed(schedule_start, date) - i64::from(rule.start_offset_weeks);
    if adjusted < 0 {
        return false;
    }

    let interval = i64::from(rule.interval_weeks.max(1));
    if adjusted % interval != 0 {
        return false;
    }

    // Cycles are counted from 1: the first kept week is odd.
    let cycle = adjusted / interval + 1;
    let parity_ok = match rule.week_parity {
        None => true,
        Some(WeekParity::Odd) => cycle % 2 == 1,
        Some(WeekParity::Even) => cycle % 2 == 0,
    };
    if !parity_ok {
        return false;
    }

    if !rule.weeks_of_month.is_empty() {
        let week = i64::from(week_of_month(date));
        if !rule.weeks_of_month.iter().any(|w| i64::from(*w) == week) {
            return false;
        }
    }

    !rule.last_week_of_month || is_last_week_of_month(date)
}
