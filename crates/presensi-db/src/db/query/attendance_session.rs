//! Query composition for `attendance_session`.

use std::collections::HashMap;

use chrono::NaiveDate;
use diesel::dsl::max;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::attendance_session;
use crate::model::attendance_session::NewAttendanceSession;

/// ## Summary
/// Returns the highest meeting number stored on live sessions of each listed
/// teaching assignment. Assignments without numbered sessions are absent.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn max_meeting_numbers(
    conn: &mut DbConnection<'_>,
    tenant_id: Uuid,
    csst_ids: &[Uuid],
) -> QueryResult<HashMap<Uuid, i32>> {
    if csst_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(Option<Uuid>, Option<i32>)> = attendance_session::table
        .filter(attendance_session::tenant_id.eq(tenant_id))
        .filter(attendance_session::csst_id.eq_any(csst_ids))
        .filter(attendance_session::deleted_at.is_null())
        .group_by(attendance_session::csst_id)
        .select((
            attendance_session::csst_id,
            max(attendance_session::meeting_number),
        ))
        .load(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(csst_id, number)| Some((csst_id?, number?)))
        .collect())
}

/// ## Summary
/// Lists the dates inside `[from, to]` that already hold a live session of the schedule.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn live_dates_for_schedule(
    conn: &mut DbConnection<'_>,
    tenant_id: Uuid,
    schedule_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> QueryResult<Vec<NaiveDate>> {
    attendance_session::table
        .filter(attendance_session::tenant_id.eq(tenant_id))
        .filter(attendance_session::schedule_id.eq(schedule_id))
        .filter(attendance_session::deleted_at.is_null())
        .filter(attendance_session::date.between(from, to))
        .select(attendance_session::date)
        .distinct()
        .load(conn)
        .await
}

/// ## Summary
/// Inserts a batch of sessions, silently skipping rows that collide with a
/// live session on the same tenant, date and schedule.
///
/// Returns the number of rows actually inserted.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn insert_batch_ignoring_conflicts(
    conn: &mut DbConnection<'_>,
    sessions: &[NewAttendanceSession],
) -> QueryResult<usize> {
    if sessions.is_empty() {
        return Ok(0);
    }

    diesel::insert_into(attendance_session::table)
        .values(sessions)
        .on_conflict_do_nothing()
        .execute(conn)
        .await
}
