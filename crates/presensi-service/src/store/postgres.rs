//! [`GenerationStore`] over a pooled Postgres connection.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use presensi_db::db::connection::DbConnection;
use presensi_db::db::query::{attendance_session, room, schedule, session_type, teaching};
use presensi_db::error::DbResult;
use presensi_db::model::attendance_session::NewAttendanceSession;
use presensi_db::model::room::{NewRoom, Room};
use presensi_db::model::schedule::{Schedule, ScheduleRule};
use presensi_db::model::session_type::{NewSessionType, SessionType};
use presensi_db::model::teaching::{Section, TeachingAssignment};
use uuid::Uuid;

use super::GenerationStore;

/// Runs every generator query on one borrowed connection.
///
/// No transaction is opened: each session batch commits on its own.
pub struct PgStore<'c, 'pool> {
    conn: &'c mut DbConnection<'pool>,
}

impl<'c, 'pool> PgStore<'c, 'pool> {
    #[must_use]
    pub fn new(conn: &'c mut DbConnection<'pool>) -> Self {
        Self { conn }
    }
}

impl GenerationStore for PgStore<'_, '_> {
    async fn load_schedule(&mut self, id: Uuid) -> DbResult<Option<Schedule>> {
        Ok(schedule::get_schedule(self.conn, id).await?)
    }

    async fn load_rules(&mut self, schedule_id: Uuid) -> DbResult<Vec<ScheduleRule>> {
        Ok(schedule::rules_for_schedule(self.conn, schedule_id).await?)
    }

    async fn load_teaching_assignment(&mut self, id: Uuid) -> DbResult<Option<TeachingAssignment>> {
        Ok(teaching::get_teaching_assignment(self.conn, id).await?)
    }

    async fn load_section(&mut self, id: Uuid) -> DbResult<Option<Section>> {
        Ok(teaching::get_section(self.conn, id).await?)
    }

    async fn find_room_by_slug(&mut self, tenant_id: Uuid, slug: &str) -> DbResult<Option<Room>> {
        Ok(room::by_slug(self.conn, tenant_id, slug).await?)
    }

    async fn insert_room(&mut self, new_room: NewRoom) -> DbResult<Room> {
        Ok(room::insert(self.conn, &new_room).await?)
    }

    async fn load_session_type(&mut self, id: Uuid) -> DbResult<Option<SessionType>> {
        Ok(session_type::get_session_type(self.conn, id).await?)
    }

    async fn find_session_type_by_slug(
        &mut self,
        tenant_id: Uuid,
        slug: &str,
    ) -> DbResult<Option<SessionType>> {
        Ok(session_type::by_slug(self.conn, tenant_id, slug).await?)
    }

    async fn insert_session_type(&mut self, new_type: NewSessionType) -> DbResult<SessionType> {
        Ok(session_type::insert(self.conn, &new_type).await?)
    }

    async fn max_meeting_numbers(
        &mut self,
        tenant_id: Uuid,
        csst_ids: &[Uuid],
    ) -> DbResult<HashMap<Uuid, i32>> {
        Ok(attendance_session::max_meeting_numbers(self.conn, tenant_id, csst_ids).await?)
    }

    async fn existing_session_dates(
        &mut self,
        tenant_id: Uuid,
        schedule_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<HashSet<NaiveDate>> {
        let dates = attendance_session::live_dates_for_schedule(
            self.conn,
            tenant_id,
            schedule_id,
            from,
            to,
        )
        .await?;
        Ok(dates.into_iter().collect())
    }

    async fn insert_sessions(&mut self, sessions: &[NewAttendanceSession]) -> DbResult<usize> {
        Ok(attendance_session::insert_batch_ignoring_conflicts(self.conn, sessions).await?)
    }
}
