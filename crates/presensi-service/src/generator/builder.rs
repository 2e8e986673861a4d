//! Assembles insertable session rows.

use presensi_core::util::slug::meeting_slug;
use presensi_db::db::enums::SessionStatus;
use presensi_db::model::attendance_session::NewAttendanceSession;
use presensi_db::model::schedule::Schedule;
use uuid::Uuid;

use super::context::ResolvedAssignment;
use super::expander::Occurrence;
use super::options::GenerateOptions;
use super::session_type::ResolvedSessionType;

/// ## Summary
/// Builds the session row for one occurrence.
///
/// Caller defaults win over values taken from the assignment. The title falls
/// back to the assignment name, and the slug is `{assignment}-pertemuan-{n}`
/// when both an assignment and a meeting number are known.
#[must_use]
pub fn build_session(
    schedule: &Schedule,
    occurrence: &Occurrence,
    assignment: Option<&ResolvedAssignment>,
    meeting_number: Option<i32>,
    session_type: &ResolvedSessionType,
    options: &GenerateOptions,
) -> NewAttendanceSession {
    let title = options
        .default_title
        .clone()
        .or_else(|| assignment.map(|a| a.title.clone()));
    let slug = assignment
        .zip(meeting_number)
        .map(|(a, number)| meeting_slug(&a.slug, number));

    NewAttendanceSession {
        id: Uuid::now_v7(),
        tenant_id: schedule.tenant_id,
        schedule_id: Some(schedule.id),
        schedule_rule_id: occurrence.rule_id,
        date: occurrence.date,
        starts_at: occurrence.starts_at,
        ends_at: occurrence.ends_at,
        teacher_id: options
            .default_teacher_id
            .or_else(|| assignment.and_then(|a| a.teacher_id)),
        room_id: options
            .default_room_id
            .or_else(|| assignment.and_then(|a| a.room_id)),
        csst_id: assignment.map(|a| a.id),
        session_type_id: Some(session_type.id),
        session_type_snapshot: Some(session_type.snapshot.clone()),
        meeting_number,
        title,
        slug,
        status: SessionStatus::Scheduled,
        attendance_status: options.default_attendance_status.unwrap_or_default(),
    }
}
