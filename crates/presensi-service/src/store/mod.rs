//! Persistence seam consumed by the occurrence generator.
//!
//! [`GenerationStore`] names every read and write one generation run performs.
//! [`postgres::PgStore`] backs it with a pooled diesel-async connection;
//! `memory::MemoryStore`, behind the `test-util` feature, keeps everything in
//! process and enforces the same uniqueness rules.

use std::collections::{HashMap, HashSet};
use std::future::Future;

use chrono::NaiveDate;
use presensi_db::error::DbResult;
use presensi_db::model::attendance_session::NewAttendanceSession;
use presensi_db::model::room::{NewRoom, Room};
use presensi_db::model::schedule::{Schedule, ScheduleRule};
use presensi_db::model::session_type::{NewSessionType, SessionType};
use presensi_db::model::teaching::{Section, TeachingAssignment};
use uuid::Uuid;

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod postgres;

pub trait GenerationStore: Send {
    /// Loads a live schedule.
    fn load_schedule(
        &mut self,
        id: Uuid,
    ) -> impl Future<Output = DbResult<Option<Schedule>>> + Send;

    /// Loads the rules of a schedule ordered by start time of day, then id.
    fn load_rules(
        &mut self,
        schedule_id: Uuid,
    ) -> impl Future<Output = DbResult<Vec<ScheduleRule>>> + Send;

    /// Loads a live teaching assignment of any tenant.
    fn load_teaching_assignment(
        &mut self,
        id: Uuid,
    ) -> impl Future<Output = DbResult<Option<TeachingAssignment>>> + Send;

    fn load_section(&mut self, id: Uuid)
    -> impl Future<Output = DbResult<Option<Section>>> + Send;

    fn find_room_by_slug(
        &mut self,
        tenant_id: Uuid,
        slug: &str,
    ) -> impl Future<Output = DbResult<Option<Room>>> + Send;

    /// Fails with `DbError::UniqueViolation` when a live room already uses the slug.
    fn insert_room(&mut self, room: NewRoom) -> impl Future<Output = DbResult<Room>> + Send;

    /// Loads a session type by id, including inactive and soft-deleted rows.
    fn load_session_type(
        &mut self,
        id: Uuid,
    ) -> impl Future<Output = DbResult<Option<SessionType>>> + Send;

    fn find_session_type_by_slug(
        &mut self,
        tenant_id: Uuid,
        slug: &str,
    ) -> impl Future<Output = DbResult<Option<SessionType>>> + Send;

    /// Fails with `DbError::UniqueViolation` when a live type already uses the slug.
    fn insert_session_type(
        &mut self,
        session_type: NewSessionType,
    ) -> impl Future<Output = DbResult<SessionType>> + Send;

    /// Highest meeting number on live sessions, per teaching assignment.
    fn max_meeting_numbers(
        &mut self,
        tenant_id: Uuid,
        csst_ids: &[Uuid],
    ) -> impl Future<Output = DbResult<HashMap<Uuid, i32>>> + Send;

    /// Dates inside `[from, to]` already holding a live session of the schedule.
    fn existing_session_dates(
        &mut self,
        tenant_id: Uuid,
        schedule_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Future<Output = DbResult<HashSet<NaiveDate>>> + Send;

    /// Inserts sessions, skipping rows that collide with a live session on the
    /// same tenant, date and schedule. Returns the number of rows inserted.
    fn insert_sessions(
        &mut self,
        sessions: &[NewAttendanceSession],
    ) -> impl Future<Output = DbResult<usize>> + Send;
}
