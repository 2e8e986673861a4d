//! Query composition for schedules and their recurrence rules.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::{schedule, schedule_rule};
use crate::model::schedule::{Schedule, ScheduleRule};

/// ## Summary
/// Loads a live schedule by id.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn get_schedule(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<Option<Schedule>> {
    schedule::table
        .filter(schedule::id.eq(id))
        .filter(schedule::deleted_at.is_null())
        .select(Schedule::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Loads every rule of a schedule, ordered by start time of day and then id.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn rules_for_schedule(
    conn: &mut DbConnection<'_>,
    schedule_id: Uuid,
) -> QueryResult<Vec<ScheduleRule>> {
    schedule_rule::table
        .filter(schedule_rule::schedule_id.eq(schedule_id))
        .order((schedule_rule::start_time_of_day.asc(), schedule_rule::id.asc()))
        .select(ScheduleRule::as_select())
        .load(conn)
        .await
}
