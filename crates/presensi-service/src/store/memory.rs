//! In-process [`GenerationStore`] for tests. Compiled only with the
//! `test-util` feature.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use presensi_db::error::{DbError, DbResult};
use presensi_db::model::attendance_session::{AttendanceSession, NewAttendanceSession};
use presensi_db::model::room::{NewRoom, Room};
use presensi_db::model::schedule::{Schedule, ScheduleRule};
use presensi_db::model::session_type::{NewSessionType, SessionType};
use presensi_db::model::teaching::{Section, TeachingAssignment};
use uuid::Uuid;

use super::GenerationStore;

/// Keeps every table in memory and mirrors the live-row unique indexes of the
/// Postgres schema.
///
/// Failure hooks let tests exercise soft-fail resolution, creation races and
/// aborted batches.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    schedules: HashMap<Uuid, Schedule>,
    rules: Vec<ScheduleRule>,
    assignments: HashMap<Uuid, TeachingAssignment>,
    sections: HashMap<Uuid, Section>,
    rooms: Vec<Room>,
    session_types: Vec<SessionType>,
    sessions: Vec<AttendanceSession>,

    failing_assignment_loads: HashSet<Uuid>,
    race_next_insert: bool,
    failing_batch: Option<usize>,
    insert_delay: Option<Duration>,
    read_delay: Option<Duration>,
    insert_calls: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_schedule(&mut self, schedule: Schedule) {
        self.schedules.insert(schedule.id, schedule);
    }

    pub fn add_rule(&mut self, rule: ScheduleRule) {
        self.rules.push(rule);
    }

    pub fn add_teaching_assignment(&mut self, assignment: TeachingAssignment) {
        self.assignments.insert(assignment.id, assignment);
    }

    pub fn add_section(&mut self, section: Section) {
        self.sections.insert(section.id, section);
    }

    pub fn add_room(&mut self, room: Room) {
        self.rooms.push(room);
    }

    pub fn add_session_type(&mut self, session_type: SessionType) {
        self.session_types.push(session_type);
    }

    #[must_use]
    pub fn sessions(&self) -> &[AttendanceSession] {
        &self.sessions
    }

    /// Live sessions of one schedule, ordered by date.
    #[must_use]
    pub fn live_sessions_for(&self, schedule_id: Uuid) -> Vec<&AttendanceSession> {
        let mut sessions: Vec<_> = self
            .sessions
            .iter()
            .filter(|s| s.schedule_id == Some(schedule_id) && s.deleted_at.is_none())
            .collect();
        sessions.sort_by_key(|s| (s.date, s.starts_at));
        sessions
    }

    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    #[must_use]
    pub fn session_types(&self) -> &[SessionType] {
        &self.session_types
    }

    pub fn session_type_mut(&mut self, id: Uuid) -> Option<&mut SessionType> {
        self.session_types.iter_mut().find(|t| t.id == id)
    }

    /// Marks a session deleted, freeing its (tenant, date, schedule) slot.
    pub fn soft_delete_session(&mut self, id: Uuid) {
        if let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) {
            session.deleted_at = Some(Utc::now());
        }
    }

    /// Makes every load of the given teaching assignment fail.
    pub fn fail_assignment_loads(&mut self, id: Uuid) {
        self.failing_assignment_loads.insert(id);
    }

    /// The next room or session-type insert behaves as if a concurrent writer
    /// created the same row first: the row is stored and a unique violation is
    /// returned.
    pub fn race_next_insert(&mut self) {
        self.race_next_insert = true;
    }

    /// Makes the n-th call to `insert_sessions` (zero-based) fail.
    pub fn fail_session_batch(&mut self, call_index: usize) {
        self.failing_batch = Some(call_index);
    }

    /// Makes every `insert_sessions` call sleep first, like a slow database.
    pub fn delay_inserts(&mut self, delay: Duration) {
        self.insert_delay = Some(delay);
    }

    /// Makes every `load_schedule` call sleep first, like a slow database.
    pub fn delay_reads(&mut self, delay: Duration) {
        self.read_delay = Some(delay);
    }

    #[must_use]
    pub const fn insert_calls(&self) -> usize {
        self.insert_calls
    }

    fn take_race(&mut self) -> bool {
        std::mem::take(&mut self.race_next_insert)
    }
}

impl GenerationStore for MemoryStore {
    async fn load_schedule(&mut self, id: Uuid) -> DbResult<Option<Schedule>> {
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self
            .schedules
            .get(&id)
            .filter(|s| s.deleted_at.is_none())
            .cloned())
    }

    async fn load_rules(&mut self, schedule_id: Uuid) -> DbResult<Vec<ScheduleRule>> {
        let mut rules: Vec<_> = self
            .rules
            .iter()
            .filter(|r| r.schedule_id == schedule_id)
            .cloned()
            .collect();
        rules.sort_by_key(|r| (r.start_time_of_day, r.id));
        Ok(rules)
    }

    async fn load_teaching_assignment(&mut self, id: Uuid) -> DbResult<Option<TeachingAssignment>> {
        if self.failing_assignment_loads.contains(&id) {
            return Err(simulated_failure());
        }
        Ok(self
            .assignments
            .get(&id)
            .filter(|a| a.deleted_at.is_none())
            .cloned())
    }

    async fn load_section(&mut self, id: Uuid) -> DbResult<Option<Section>> {
        Ok(self
            .sections
            .get(&id)
            .filter(|s| s.deleted_at.is_none())
            .cloned())
    }

    async fn find_room_by_slug(&mut self, tenant_id: Uuid, slug: &str) -> DbResult<Option<Room>> {
        Ok(self
            .rooms
            .iter()
            .find(|r| r.tenant_id == tenant_id && r.slug == slug && r.deleted_at.is_none())
            .cloned())
    }

    async fn insert_room(&mut self, new_room: NewRoom) -> DbResult<Room> {
        let taken = self.rooms.iter().any(|r| {
            r.tenant_id == new_room.tenant_id && r.slug == new_room.slug && r.deleted_at.is_none()
        });
        if taken {
            return Err(DbError::UniqueViolation("room_tenant_slug_live".to_string()));
        }

        let room = Room {
            id: new_room.id,
            tenant_id: new_room.tenant_id,
            name: new_room.name,
            slug: new_room.slug,
            section_id: new_room.section_id,
            created_at: Utc::now(),
            deleted_at: None,
        };
        self.rooms.push(room.clone());

        if self.take_race() {
            return Err(DbError::UniqueViolation("room_tenant_slug_live".to_string()));
        }
        Ok(room)
    }

    async fn load_session_type(&mut self, id: Uuid) -> DbResult<Option<SessionType>> {
        Ok(self.session_types.iter().find(|t| t.id == id).cloned())
    }

    async fn find_session_type_by_slug(
        &mut self,
        tenant_id: Uuid,
        slug: &str,
    ) -> DbResult<Option<SessionType>> {
        Ok(self
            .session_types
            .iter()
            .find(|t| t.tenant_id == tenant_id && t.slug == slug && t.deleted_at.is_none())
            .cloned())
    }

    async fn insert_session_type(&mut self, new_type: NewSessionType) -> DbResult<SessionType> {
        let taken = self.session_types.iter().any(|t| {
            t.tenant_id == new_type.tenant_id && t.slug == new_type.slug && t.deleted_at.is_none()
        });
        if taken {
            return Err(DbError::UniqueViolation(
                "session_type_tenant_slug_live".to_string(),
            ));
        }

        let now = Utc::now();
        let session_type = SessionType {
            id: new_type.id,
            tenant_id: new_type.tenant_id,
            slug: new_type.slug,
            name: new_type.name,
            description: new_type.description,
            color: new_type.color,
            icon: new_type.icon,
            allow_self_attendance: new_type.allow_self_attendance,
            allow_teacher_attendance: new_type.allow_teacher_attendance,
            required_reason_states: new_type.required_reason_states,
            attendance_window_mode: new_type.attendance_window_mode,
            attendance_open_offset_minutes: new_type.attendance_open_offset_minutes,
            attendance_close_offset_minutes: new_type.attendance_close_offset_minutes,
            is_active: new_type.is_active,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.session_types.push(session_type.clone());

        if self.take_race() {
            return Err(DbError::UniqueViolation(
                "session_type_tenant_slug_live".to_string(),
            ));
        }
        Ok(session_type)
    }

    async fn max_meeting_numbers(
        &mut self,
        tenant_id: Uuid,
        csst_ids: &[Uuid],
    ) -> DbResult<HashMap<Uuid, i32>> {
        let mut maxima = HashMap::new();
        for session in &self.sessions {
            if session.tenant_id != tenant_id || session.deleted_at.is_some() {
                continue;
            }
            let (Some(csst_id), Some(number)) = (session.csst_id, session.meeting_number) else {
                continue;
            };
            if !csst_ids.contains(&csst_id) {
                continue;
            }
            let entry = maxima.entry(csst_id).or_insert(number);
            *entry = (*entry).max(number);
        }
        Ok(maxima)
    }

    async fn existing_session_dates(
        &mut self,
        tenant_id: Uuid,
        schedule_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<HashSet<NaiveDate>> {
        Ok(self
            .sessions
            .iter()
            .filter(|s| {
                s.tenant_id == tenant_id
                    && s.schedule_id == Some(schedule_id)
                    && s.deleted_at.is_none()
                    && s.date >= from
                    && s.date <= to
            })
            .map(|s| s.date)
            .collect())
    }

    async fn insert_sessions(&mut self, sessions: &[NewAttendanceSession]) -> DbResult<usize> {
        if let Some(delay) = self.insert_delay {
            tokio::time::sleep(delay).await;
        }

        let call = self.insert_calls;
        self.insert_calls += 1;
        if self.failing_batch == Some(call) {
            return Err(simulated_failure());
        }

        let mut inserted = 0;
        for new in sessions {
            let conflict = self.sessions.iter().any(|s| {
                s.deleted_at.is_none()
                    && s.tenant_id == new.tenant_id
                    && s.date == new.date
                    && s.schedule_id == new.schedule_id
            });
            if conflict {
                continue;
            }

            self.sessions.push(AttendanceSession {
                id: new.id,
                tenant_id: new.tenant_id,
                schedule_id: new.schedule_id,
                schedule_rule_id: new.schedule_rule_id,
                date: new.date,
                starts_at: new.starts_at,
                ends_at: new.ends_at,
                teacher_id: new.teacher_id,
                room_id: new.room_id,
                csst_id: new.csst_id,
                session_type_id: new.session_type_id,
                session_type_snapshot: new.session_type_snapshot.clone(),
                meeting_number: new.meeting_number,
                title: new.title.clone(),
                slug: new.slug.clone(),
                status: new.status,
                attendance_status: new.attendance_status,
                created_at: Utc::now(),
                deleted_at: None,
            });
            inserted += 1;
        }
        Ok(inserted)
    }
}

fn simulated_failure() -> DbError {
    DbError::DatabaseError(diesel::result::Error::BrokenTransactionManager)
}
